//! Factory for creating database clients

use crate::client::DbClient;
use crate::error::DbError;
use passhub_config::{AppConfig, DatabaseConfig};
use std::sync::Arc;
use tracing::debug;

/// Factory for creating database clients from the various configuration
/// sources.
#[derive(Debug, Clone)]
pub struct DbClientFactory;

impl DbClientFactory {
    /// Create a new database client factory
    pub fn new() -> Self {
        Self
    }

    /// Create a database client from an application configuration.
    pub async fn from_app_config(&self, config: &Arc<AppConfig>) -> Result<DbClient, DbError> {
        debug!("Creating database client from application configuration");
        DbClient::new(config).await
    }

    /// Create a database client from a database configuration.
    pub async fn from_db_config(&self, db_config: &DatabaseConfig) -> Result<DbClient, DbError> {
        debug!("Creating database client from database configuration");
        DbClient::from_config(db_config).await
    }

    /// Create a database client from a database URL.
    pub async fn from_url(&self, db_url: &str) -> Result<DbClient, DbError> {
        debug!("Creating database client from URL");
        DbClient::from_url(db_url).await
    }
}

impl Default for DbClientFactory {
    fn default() -> Self {
        Self::new()
    }
}
