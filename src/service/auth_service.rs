use std::sync::Arc;

use serde::Serialize;

use crate::auth::jwt;
use crate::auth::jwt::Claims;
use crate::auth::password;
use crate::config::Config;
use crate::error::AppError;
use crate::model::UserModel;
use crate::repository::Repository;
use crate::service::error::ServiceError;

/// What a successful register/login returns. The model's password hash is
/// never serialized.
#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserModel,
}

pub struct AuthService {
    db: Arc<Repository>,
    jwt_secret: String,
    jwt_expiry_hours: i64,
}

impl AuthService {
    /// Fails when `JWT_SECRET` is not configured; the API server must not
    /// come up issuing unverifiable tokens.
    pub fn new(db: Arc<Repository>, config: &Config) -> Result<Self, AppError> {
        let jwt_secret = config.require_jwt_secret()?.to_string();
        Ok(Self {
            db,
            jwt_secret,
            jwt_expiry_hours: config.jwt_expiry_hours,
        })
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ServiceError> {
        let username = username.trim();
        if username.len() < 3 || username.len() > 32 {
            return Err(ServiceError::Validation(
                "Username must be between 3 and 32 characters".to_string(),
            ));
        }
        let email = email.trim();
        if !email.contains('@') {
            return Err(ServiceError::Validation(
                "Email address is not valid".to_string(),
            ));
        }
        if password.len() < 8 {
            return Err(ServiceError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        let hash = password::hash_password(password).map_err(|e| {
            ServiceError::UnexpectedResult {
                message: format!("Password hashing failed: {e}"),
            }
        })?;

        let user = match self.db.user.insert(username, email, &hash).await {
            Ok(user) => user,
            Err(err) if err.is_unique_violation(Some("users_username_key")) => {
                return Err(ServiceError::Conflict(
                    "Username is already taken".to_string(),
                ));
            }
            Err(err) if err.is_unique_violation(Some("users_email_key")) => {
                return Err(ServiceError::Conflict(
                    "Email is already registered".to_string(),
                ));
            }
            Err(err) => return Err(err.into()),
        };

        let token = self.issue_token(&user)?;
        Ok(AuthResponse { token, user })
    }

    /// Logs in with a username or an email address.
    ///
    /// Every failure path collapses into the same Unauthorized message so
    /// the endpoint does not reveal which accounts exist.
    pub async fn login(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<AuthResponse, ServiceError> {
        let identifier = identifier.trim();
        let user = match self.db.user.select_by_username(identifier).await? {
            Some(user) => Some(user),
            None => self.db.user.select_by_email(identifier).await?,
        };
        let Some(user) = user else {
            return Err(Self::bad_credentials());
        };
        if !password::verify_password(password, &user.password_hash) {
            return Err(Self::bad_credentials());
        }

        let token = self.issue_token(&user)?;
        Ok(AuthResponse { token, user })
    }

    /// The account behind a validated token. A valid token for a deleted
    /// account is treated like a bad token.
    pub async fn me(&self, user_id: i64) -> Result<UserModel, ServiceError> {
        self.db
            .user
            .select(user_id)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("Invalid or expired token".to_string()))
    }

    /// Validates a bearer token and returns its claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims, ServiceError> {
        jwt::verify_token(&self.jwt_secret, token)
            .map_err(|_| ServiceError::Unauthorized("Invalid or expired token".to_string()))
    }

    fn issue_token(&self, user: &UserModel) -> Result<String, ServiceError> {
        jwt::issue_token(&self.jwt_secret, user.id, &user.username, self.jwt_expiry_hours)
            .map_err(|e| ServiceError::UnexpectedResult {
                message: format!("Token signing failed: {e}"),
            })
    }

    fn bad_credentials() -> ServiceError {
        ServiceError::Unauthorized("Invalid username or password".to_string())
    }
}
