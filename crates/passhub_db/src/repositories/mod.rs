//! Repository modules for database access

pub mod push_association;
pub mod push_association_factory;
pub mod push_association_sql;

// Re-export the push association repository and factory for ease of use
pub use push_association::{NewPushAssociation, PushAssociation, PushAssociationRepository};
pub use push_association_factory::PushAssociationRepositoryFactory;
pub use push_association_sql::SqlPushAssociationRepository;
