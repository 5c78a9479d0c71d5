use passhub_db::{
    DbClient, NewPushAssociation, PushAssociationRepository, PushAssociationRepositoryFactory,
    RepositoryFactory, SqlPushAssociationRepository,
};
use std::path::PathBuf;
use std::sync::Arc;

const PASS_TYPE: &str = "pass.com.example.passhub";

// Each test gets its own throwaway sqlite file; in-memory sqlite would give
// every pooled connection a private database.
fn temp_db_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("passhub_{}_{}.db", tag, std::process::id()))
}

async fn setup(tag: &str) -> (SqlPushAssociationRepository, PathBuf) {
    let path = temp_db_path(tag);
    let _ = std::fs::remove_file(&path);

    let client = DbClient::from_url(&format!("sqlite:{}", path.display()))
        .await
        .expect("database client");
    let repo = PushAssociationRepositoryFactory::new().create_repository(client);
    repo.init_schema().await.expect("schema init");

    (repo, path)
}

fn association(device_id: &str, pass_id: &str, push_token: &str) -> NewPushAssociation {
    NewPushAssociation {
        device_id: device_id.to_string(),
        pass_type: PASS_TYPE.to_string(),
        pass_id: pass_id.to_string(),
        push_token: push_token.to_string(),
    }
}

#[tokio::test]
async fn first_registration_inserts_and_re_registration_is_a_no_op() {
    let (repo, path) = setup("register").await;

    let inserted = repo.register(association("12345", "abc", "54321")).await.unwrap();
    assert!(inserted);
    assert!(repo.exists("12345", PASS_TYPE, "abc").await.unwrap());

    // Same triple, different token: no insert, original token retained.
    let inserted = repo.register(association("12345", "abc", "99999")).await.unwrap();
    assert!(!inserted);

    let records = repo.find_updated_since("12345", 0).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].device_id, "12345");
    assert_eq!(records[0].pass_id, "abc");
    assert_eq!(records[0].push_token, "54321");

    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn same_device_can_register_multiple_passes() {
    let (repo, path) = setup("multi_pass").await;

    assert!(repo.register(association("dev-1", "abc", "t1")).await.unwrap());
    assert!(repo.register(association("dev-1", "def", "t2")).await.unwrap());

    let records = repo.find_updated_since("dev-1", 0).await.unwrap();
    let mut serials: Vec<_> = records.iter().map(|r| r.pass_id.as_str()).collect();
    serials.sort_unstable();
    assert_eq!(serials, ["abc", "def"]);

    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn find_updated_since_is_strictly_greater() {
    let (repo, path) = setup("since").await;

    repo.register(association("dev-2", "abc", "t1")).await.unwrap();
    let records = repo.find_updated_since("dev-2", 0).await.unwrap();
    assert_eq!(records.len(), 1);
    let created_at = records[0].created_at;
    assert!(created_at > 0);

    // A tag equal to the creation timestamp must not re-return the record.
    assert!(repo.find_updated_since("dev-2", created_at).await.unwrap().is_empty());
    assert_eq!(
        repo.find_updated_since("dev-2", created_at - 1).await.unwrap().len(),
        1
    );

    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn find_updated_since_only_returns_the_requested_device() {
    let (repo, path) = setup("device_scope").await;

    repo.register(association("dev-a", "abc", "t1")).await.unwrap();
    repo.register(association("dev-b", "abc", "t2")).await.unwrap();

    let records = repo.find_updated_since("dev-a", 0).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].device_id, "dev-a");

    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn delete_all_is_idempotent() {
    let (repo, path) = setup("delete").await;

    // Deleting with nothing stored is success, not an error.
    assert_eq!(repo.delete_all("dev-3", PASS_TYPE, "abc").await.unwrap(), 0);

    repo.register(association("dev-3", "abc", "t1")).await.unwrap();
    assert_eq!(repo.delete_all("dev-3", PASS_TYPE, "abc").await.unwrap(), 1);
    assert!(!repo.exists("dev-3", PASS_TYPE, "abc").await.unwrap());

    assert_eq!(repo.delete_all("dev-3", PASS_TYPE, "abc").await.unwrap(), 0);

    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn concurrent_registrations_of_one_triple_insert_once() {
    let (repo, path) = setup("concurrent").await;
    let repo = Arc::new(repo);

    let (a, b, c, d) = tokio::join!(
        repo.register(association("dev-4", "abc", "t1")),
        repo.register(association("dev-4", "abc", "t2")),
        repo.register(association("dev-4", "abc", "t3")),
        repo.register(association("dev-4", "abc", "t4")),
    );
    let inserted = [a.unwrap(), b.unwrap(), c.unwrap(), d.unwrap()]
        .iter()
        .filter(|i| **i)
        .count();
    assert_eq!(inserted, 1);

    let records = repo.find_updated_since("dev-4", 0).await.unwrap();
    assert_eq!(records.len(), 1);

    let _ = std::fs::remove_file(path);
}
