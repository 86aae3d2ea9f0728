use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use log::error;

use crate::api::response::ApiResponse;
use crate::service::error::ServiceError;

/// Error type every handler returns. Converts into an enveloped response
/// with the right status code.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Service(err) => match err {
                ServiceError::Validation(message) => (StatusCode::BAD_REQUEST, message),
                ServiceError::NotFound(message) => (StatusCode::NOT_FOUND, message),
                ServiceError::Conflict(message) => (StatusCode::CONFLICT, message),
                ServiceError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message),
                // Internal detail stays in the log, never in the body.
                other => {
                    error!("Request failed: {other}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            },
        };
        (status, ApiResponse::error(message)).into_response()
    }
}
