//! SQL implementation of the push association repository

use crate::error::DbError;
use crate::repositories::push_association::{
    NewPushAssociation, PushAssociation, PushAssociationRepository,
};
use crate::DbClient;
use chrono::Utc;
use passhub_common::BoxFuture;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

/// SQL implementation of the push association repository
#[derive(Debug, Clone)]
pub struct SqlPushAssociationRepository {
    /// The database client
    db_client: DbClient,
}

impl SqlPushAssociationRepository {
    /// Create a new SQL push association repository
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn row_to_association(row: &AnyRow) -> PushAssociation {
    PushAssociation {
        id: row.try_get("id").ok(),
        device_id: row.try_get("device_id").unwrap_or_default(),
        pass_type: row.try_get("pass_type").unwrap_or_default(),
        pass_id: row.try_get("pass_id").unwrap_or_default(),
        push_token: row.try_get("push_token").unwrap_or_default(),
        created_at: row.try_get("created_at").unwrap_or_default(),
    }
}

impl PushAssociationRepository for SqlPushAssociationRepository {
    fn init_schema(&self) -> BoxFuture<'_, (), DbError> {
        Box::pin(async move {
            debug!("Initializing push association schema");

            // The UNIQUE constraint is the store's uniqueness invariant;
            // register() relies on it for its atomic conditional insert.
            let query = r#"
                CREATE TABLE IF NOT EXISTS push_associations (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    device_id TEXT NOT NULL,
                    pass_type TEXT NOT NULL,
                    pass_id TEXT NOT NULL,
                    push_token TEXT NOT NULL,
                    created_at INTEGER NOT NULL,
                    UNIQUE(device_id, pass_type, pass_id)
                )
            "#;

            self.db_client.execute(query).await?;

            info!("Push association schema initialized successfully");
            Ok(())
        })
    }

    fn register(&self, new: NewPushAssociation) -> BoxFuture<'_, bool, DbError> {
        Box::pin(async move {
            debug!(
                "Registering device {} for pass {}",
                new.device_id, new.pass_id
            );

            // Single-statement conditional insert: when the triple already
            // exists the statement affects zero rows and the stored token
            // stays as it was.
            let query = r#"
                INSERT INTO push_associations (device_id, pass_type, pass_id, push_token, created_at)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT(device_id, pass_type, pass_id) DO NOTHING
            "#;

            let result = sqlx::query(query)
                .bind(&new.device_id)
                .bind(&new.pass_type)
                .bind(&new.pass_id)
                .bind(&new.push_token)
                .bind(Utc::now().timestamp())
                .execute(self.db_client.pool())
                .await
                .map_err(|e| {
                    error!("Failed to insert push association: {}", e);
                    DbError::QueryError(e.to_string())
                })?;

            Ok(result.rows_affected() > 0)
        })
    }

    fn exists<'a>(
        &'a self,
        device_id: &'a str,
        pass_type: &'a str,
        pass_id: &'a str,
    ) -> BoxFuture<'a, bool, DbError> {
        Box::pin(async move {
            let query = r#"
                SELECT id
                FROM push_associations
                WHERE device_id = $1 AND pass_type = $2 AND pass_id = $3
                LIMIT 1
            "#;

            let result = sqlx::query(query)
                .bind(device_id)
                .bind(pass_type)
                .bind(pass_id)
                .fetch_optional(self.db_client.pool())
                .await
                .map_err(|e| {
                    error!("Failed to look up push association: {}", e);
                    DbError::QueryError(e.to_string())
                })?;

            Ok(result.is_some())
        })
    }

    fn find_updated_since<'a>(
        &'a self,
        device_id: &'a str,
        since_secs: i64,
    ) -> BoxFuture<'a, Vec<PushAssociation>, DbError> {
        Box::pin(async move {
            debug!(
                "Finding associations for device {} updated since {}",
                device_id, since_secs
            );

            let query = r#"
                SELECT id, device_id, pass_type, pass_id, push_token, created_at
                FROM push_associations
                WHERE device_id = $1 AND created_at > $2
            "#;

            let rows = sqlx::query(query)
                .bind(device_id)
                .bind(since_secs)
                .fetch_all(self.db_client.pool())
                .await
                .map_err(|e| {
                    error!("Failed to find push associations: {}", e);
                    DbError::QueryError(e.to_string())
                })?;

            Ok(rows.iter().map(row_to_association).collect())
        })
    }

    fn delete_all<'a>(
        &'a self,
        device_id: &'a str,
        pass_type: &'a str,
        pass_id: &'a str,
    ) -> BoxFuture<'a, u64, DbError> {
        Box::pin(async move {
            debug!(
                "Deleting push associations for device {} and pass {}",
                device_id, pass_id
            );

            let query = r#"
                DELETE FROM push_associations
                WHERE device_id = $1 AND pass_type = $2 AND pass_id = $3
            "#;

            let result = sqlx::query(query)
                .bind(device_id)
                .bind(pass_type)
                .bind(pass_id)
                .execute(self.db_client.pool())
                .await
                .map_err(|e| {
                    error!("Failed to delete push associations: {}", e);
                    DbError::QueryError(e.to_string())
                })?;

            Ok(result.rows_affected())
        })
    }
}
