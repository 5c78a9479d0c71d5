//! Shared ambient pieces for the PassHub crates: logging setup, the
//! HTTP status mapping trait, and the boxed-future alias used by
//! object-safe async traits.

pub mod error;
pub mod logging;
pub mod services;

pub use error::HttpStatusCode;
pub use services::BoxFuture;
