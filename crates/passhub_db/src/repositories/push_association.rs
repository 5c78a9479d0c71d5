//! Repository for push associations
//!
//! A push association records one device's interest in push updates for one
//! pass. The `(device_id, pass_type, pass_id)` triple is the logical key:
//! at most one live record may exist per triple, and re-registering an
//! existing triple never changes the stored push token.

use crate::error::DbError;
use passhub_common::BoxFuture;
use serde::{Deserialize, Serialize};

/// A stored device↔pass push registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushAssociation {
    /// Storage-internal surrogate key, never exposed to clients.
    pub id: Option<i64>,
    pub device_id: String,
    pub pass_type: String,
    pub pass_id: String,
    pub push_token: String,
    /// Unix seconds. The protocol's update tags carry no finer resolution,
    /// so neither does the store.
    pub created_at: i64,
}

/// Field set for a registration that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewPushAssociation {
    pub device_id: String,
    pub pass_type: String,
    pub pass_id: String,
    pub push_token: String,
}

/// Repository for push associations
///
/// Object-safe (methods return [`BoxFuture`]) so handler state can hold an
/// `Arc<dyn PushAssociationRepository>` and tests can substitute an
/// in-memory implementation.
pub trait PushAssociationRepository: Send + Sync {
    /// Create the backing table and its unique index if they don't exist.
    fn init_schema(&self) -> BoxFuture<'_, (), DbError>;

    /// Atomically insert the association unless its triple already exists.
    ///
    /// Returns `true` iff a row was inserted. `false` means the triple was
    /// already registered; the stored push token is left untouched. The
    /// conditional insert happens in a single statement against the unique
    /// constraint, so two concurrent registrations of one triple cannot
    /// both insert.
    fn register(&self, new: NewPushAssociation) -> BoxFuture<'_, bool, DbError>;

    /// Whether a live record matches the triple.
    fn exists<'a>(
        &'a self,
        device_id: &'a str,
        pass_type: &'a str,
        pass_id: &'a str,
    ) -> BoxFuture<'a, bool, DbError>;

    /// All records for the device created strictly after `since_secs`,
    /// in store order.
    fn find_updated_since<'a>(
        &'a self,
        device_id: &'a str,
        since_secs: i64,
    ) -> BoxFuture<'a, Vec<PushAssociation>, DbError>;

    /// Delete every record matching the triple.
    ///
    /// Returns the number of rows removed; zero matches is success, not an
    /// error.
    fn delete_all<'a>(
        &'a self,
        device_id: &'a str,
        pass_type: &'a str,
        pass_id: &'a str,
    ) -> BoxFuture<'a, u64, DbError>;
}
