//! Apple PassKit web service protocol handlers.
//!
//! Implements the five protocol operations for a single configured pass
//! type — device registration, change query, conditional pass retrieval,
//! deregistration — plus the diagnostic log endpoint and the legacy
//! redirect. The association store and the pass file directory are injected
//! through [`PassesState`].
// Implements https://developer.apple.com/library/archive/documentation/PassKit/Reference/PassKit_WebService/WebService.html

#[cfg(feature = "openapi")]
pub mod doc;
pub mod error;
pub mod files;
pub mod handlers;
pub mod logic;
pub mod models;
pub mod routes;

pub use error::PassError;
pub use files::{PassFileResolver, PASS_CONTENT_TYPE, PASS_FILE_EXTENSION};
pub use handlers::PassesState;
pub use routes::routes;
