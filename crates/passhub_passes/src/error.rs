use passhub_common::HttpStatusCode;
use passhub_db::DbError;
use thiserror::Error;

/// Errors raised by the PassKit protocol operations.
#[derive(Error, Debug)]
pub enum PassError {
    /// The path's pass type identifier is not the one this deployment serves
    #[error("unknown pass type identifier")]
    InvalidPassType,

    /// The registration body carried no push token
    #[error("missing pushToken in request body")]
    MissingPushToken,

    /// No pass file corresponds to the serial number
    #[error("pass not found")]
    PassNotFound,

    /// Association store failure
    #[error("database error: {0}")]
    Database(#[from] DbError),

    /// The pass file exists but could not be read
    #[error("pass file error: {0}")]
    Io(#[from] std::io::Error),
}

impl HttpStatusCode for PassError {
    fn status_code(&self) -> u16 {
        match self {
            PassError::InvalidPassType => 400,
            PassError::MissingPushToken => 400,
            PassError::PassNotFound => 404,
            PassError::Database(_) => 500,
            PassError::Io(_) => 500,
        }
    }
}
