//! Repository factory trait
//!
//! Repositories are constructed through factories so services can swap
//! implementations (and tests can inject in-memory ones) without touching
//! call sites.

/// A trait for database repository factories
///
/// Generic over the repository type and the configuration it is built from.
pub trait RepositoryFactory<R, C> {
    /// Create a new repository instance
    fn create_repository(&self, config: C) -> R;
}
