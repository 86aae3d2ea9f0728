use crate::jikan::error::JikanError;
use crate::repository::error::DatabaseError;

/// Errors crossing the service boundary.
///
/// The first four variants carry user-facing messages; the HTTP layer maps
/// them onto 400/404/409/401. Everything else is internal and surfaces as a
/// generic 500.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Unexpected result: {message}")]
    UnexpectedResult { message: String },

    #[error("JikanError: {0}")]
    JikanError(#[from] JikanError),

    #[error("DatabaseError: {0}")]
    DatabaseError(#[from] DatabaseError),
}
