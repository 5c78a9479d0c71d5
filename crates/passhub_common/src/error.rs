/// A trait for converting errors to HTTP status codes.
///
/// Error types implement this to give handlers a consistent way to turn a
/// domain error into the status the transport layer should answer with.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}
