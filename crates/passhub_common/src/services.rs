//! Support types for object-safe async service traits.

use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result.
///
/// Traits whose implementations end up behind `Arc<dyn ...>` return this
/// instead of `impl Future`, which is not object-safe.
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;
