use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::AuthSettings;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Missing Authorization header")]
    Missing,
    #[error("Authorization header must use Bearer token format")]
    Malformed,
    #[error("Invalid or expired token")]
    Invalid,
    #[error("Token generation failed: {0}")]
    Generation(String),
}

/// Issues and verifies the HS256 bearer tokens that carry the caller's user
/// id. Verification is purely local; no store round trip per request.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    expiry_hours: i64,
}

impl TokenIssuer {
    pub fn new(secret: impl Into<String>, expiry_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            expiry_hours,
        }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(settings.jwt_secret.clone(), settings.token_expiry_hours)
    }

    pub fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| TokenError::Generation(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims.sub)
        .map_err(|_| TokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret", 24)
    }

    #[test]
    fn issue_and_verify_round_trip() {
        let user_id = Uuid::new_v4();
        let token = issuer().issue(user_id).unwrap();
        assert_eq!(issuer().verify(&token).unwrap(), user_id);
    }

    #[test]
    fn expired_token_is_rejected() {
        let expired = TokenIssuer::new("test-secret", -1);
        let token = expired.issue(Uuid::new_v4()).unwrap();
        assert!(issuer().verify(&token).is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let other = TokenIssuer::new("other-secret", 24);
        let token = other.issue(Uuid::new_v4()).unwrap();
        assert!(issuer().verify(&token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(issuer().verify("definitely.not.a-jwt").is_err());
    }
}
