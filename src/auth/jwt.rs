use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Claims carried by every issued token. `sub` is the user's internal id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
    /// Unique per token so two logins in the same second still differ.
    pub jti: String,
}

/// Signs a token for `user_id`, valid for `expiry_hours` from now.
pub fn issue_token(
    secret: &str,
    user_id: i64,
    username: &str,
    expiry_hours: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(expiry_hours)).timestamp(),
        jti: Uuid::new_v4().to_string(),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Decodes and validates a token, checking signature and expiry.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-do-not-use";

    #[test]
    fn issue_and_verify_round_trip() {
        let token = issue_token(SECRET, 42, "momo", 1).unwrap();
        let claims = verify_token(SECRET, &token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.username, "momo");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(SECRET, 42, "momo", 1).unwrap();
        assert!(verify_token("other-secret", &token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        // Issued two hours in the past, well beyond the default leeway.
        let token = issue_token(SECRET, 42, "momo", -2).unwrap();
        assert!(verify_token(SECRET, &token).is_err());
    }

    #[test]
    fn tokens_are_unique_per_login() {
        let first = issue_token(SECRET, 42, "momo", 1).unwrap();
        let second = issue_token(SECRET, 42, "momo", 1).unwrap();
        assert_ne!(first, second);
    }
}
