use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User or seller ID
    pub exp: i64,    // Expiration timestamp
    pub iat: i64,    // Issued at timestamp
}

/// Tokens are normally issued by the identity service; this is for tooling
/// and tests that share its secret.
pub fn create_access_token(
    subject: &str,
    secret: &str,
    expires_in_secs: i64,
) -> Result<String, AppError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expires_in_secs);

    let claims = Claims {
        sub: subject.to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

pub fn verify_access_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("Token verification failed: {}", e);
        AppError::Unauthorized
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_subject() {
        let token = create_access_token("u1", "secret", 60).unwrap();
        let claims = verify_access_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, "u1");
    }

    #[test]
    fn wrong_secret_is_unauthorized() {
        let token = create_access_token("u1", "secret", 60).unwrap();
        let result = verify_access_token(&token, "other");
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn expired_token_is_unauthorized() {
        let token = create_access_token("u1", "secret", -3600).unwrap();
        let result = verify_access_token(&token, "secret");
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }
}
