#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum JikanError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Failed to parse API response: {0}")]
    JsonParseFailed(#[from] serde_json::Error),

    #[error("Resource not found: {path}")]
    NotFound { path: String },

    #[error("Still rate limited after {attempts} attempts: {path}")]
    RateLimited { attempts: u32, path: String },

    #[error("Jikan API error (status {status}): {message}")]
    ApiError { status: u16, message: String },
}
