//! Factory for creating push association repositories

use crate::repositories::push_association_sql::SqlPushAssociationRepository;
use crate::{DbClient, RepositoryFactory};

/// Factory for creating push association repositories
#[derive(Debug, Clone)]
pub struct PushAssociationRepositoryFactory;

impl PushAssociationRepositoryFactory {
    /// Create a new push association repository factory
    pub fn new() -> Self {
        Self
    }
}

impl Default for PushAssociationRepositoryFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryFactory<SqlPushAssociationRepository, DbClient> for PushAssociationRepositoryFactory {
    /// Create a new push association repository backed by the given client
    fn create_repository(&self, db_client: DbClient) -> SqlPushAssociationRepository {
        SqlPushAssociationRepository::new(db_client)
    }
}
