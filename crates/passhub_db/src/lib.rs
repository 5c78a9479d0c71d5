//! Push association store for PassHub
//!
//! This crate holds the durable table of device↔pass push registrations.
//! It is built on SQLx with the `Any` driver so the backend database is
//! chosen by the connection URL; SQLite is the default feature, PostgreSQL
//! and MySQL are available behind feature flags.
//!
//! The store enforces the protocol's uniqueness invariant at the schema
//! level: at most one live record per `(device_id, pass_type, pass_id)`
//! triple, with registration implemented as an atomic conditional insert.

pub mod client;
pub mod error;
pub mod factory;
pub mod repositories;
pub mod repository;

// Re-export the client, factory, and repository traits for ease of use
pub use client::DbClient;
pub use error::DbError;
pub use factory::DbClientFactory;
pub use repository::RepositoryFactory;

// Re-export the repositories module components for ease of use
pub use repositories::{
    NewPushAssociation, PushAssociation, PushAssociationRepository,
    PushAssociationRepositoryFactory, SqlPushAssociationRepository,
};
