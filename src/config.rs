use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

#[derive(Clone, Default)]
pub struct Config {
    pub db_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: Option<String>,
    pub jwt_expiry_hours: i64,
    pub jikan_base_url: String,
    pub jikan_max_retries: u32,
    pub jikan_retry_delay: Duration,
    pub cors_allow_origin: Option<String>,
    pub logs_path: PathBuf,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the configuration from environment variables.
    ///
    /// `DATABASE_URL` is the only variable required by every binary; the
    /// API server additionally refuses to start without `JWT_SECRET`
    /// (checked in [`Config::require_jwt_secret`]).
    pub fn load(&mut self) -> Result<(), AppError> {
        self.db_url = std::env::var("DATABASE_URL").map_err(|_| AppError::MissingConfig {
            key: "DATABASE_URL".to_string(),
        })?;
        self.host = std::env::var("HOST").unwrap_or("127.0.0.1".to_string());
        self.port = std::env::var("PORT")
            .unwrap_or("3001".to_string())
            .parse::<u16>()
            .map_err(|e| AppError::ConfigurationError {
                msg: format!("PORT is not a valid port number: {e}"),
            })?;
        self.jwt_secret = std::env::var("JWT_SECRET").ok();
        self.jwt_expiry_hours = std::env::var("JWT_EXPIRY_HOURS")
            .unwrap_or("168".to_string())
            .parse::<i64>()
            .map_err(|e| AppError::ConfigurationError {
                msg: format!("JWT_EXPIRY_HOURS is not a number: {e}"),
            })?;
        self.jikan_base_url = std::env::var("JIKAN_BASE_URL")
            .unwrap_or("https://api.jikan.moe/v4".to_string())
            .trim_end_matches('/')
            .to_string();
        self.jikan_max_retries = std::env::var("JIKAN_MAX_RETRIES")
            .unwrap_or("3".to_string())
            .parse::<u32>()
            .map_err(|e| AppError::ConfigurationError {
                msg: format!("JIKAN_MAX_RETRIES is not a number: {e}"),
            })?;
        self.jikan_retry_delay = std::env::var("JIKAN_RETRY_DELAY")
            .unwrap_or("4".to_string())
            .parse::<u64>()
            .map_or(Duration::new(4, 0), |v| Duration::new(v, 0));
        self.cors_allow_origin = std::env::var("CORS_ALLOW_ORIGIN").ok();
        self.logs_path = PathBuf::from(std::env::var("LOGS_PATH").unwrap_or("logs".to_string()));
        Ok(())
    }

    pub fn require_jwt_secret(&self) -> Result<&str, AppError> {
        self.jwt_secret
            .as_deref()
            .ok_or_else(|| AppError::MissingConfig {
                key: "JWT_SECRET".to_string(),
            })
    }
}
