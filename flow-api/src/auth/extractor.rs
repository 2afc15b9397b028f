use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};
use uuid::Uuid;

use crate::routes::ApiError;

use super::token::{TokenError, TokenIssuer};

/// The authenticated caller, extracted from the `Authorization: Bearer`
/// header. Rejects with 401 when the token is missing, malformed or expired.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: Uuid,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    TokenIssuer: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let issuer = TokenIssuer::from_ref(state);
        let token = bearer_token(&parts.headers)?;
        let user_id = issuer.verify(&token)?;

        Ok(AuthUser { id: user_id })
    }
}

fn bearer_token(headers: &HeaderMap) -> Result<String, TokenError> {
    let header_value = headers
        .get(header::AUTHORIZATION)
        .ok_or(TokenError::Missing)?
        .to_str()
        .map_err(|_| TokenError::Malformed)?;

    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or(TokenError::Malformed)?;

    if token.trim().is_empty() {
        return Err(TokenError::Malformed);
    }

    Ok(token.to_string())
}
