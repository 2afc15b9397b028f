use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::{app_state::AppState, domain::User, repositories::UserRepository, routes::ApiError};

use super::password::{hash_password, verify_password};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[derive(Debug, Deserialize)]
struct RegisterPayload {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginPayload {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    token: String,
    user: User,
}

#[instrument(name = "register", skip(app_state, payload))]
async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let (Some(name), Some(email), Some(password)) = (
        payload.name.filter(|v| !v.trim().is_empty()),
        payload.email.filter(|v| !v.trim().is_empty()),
        payload.password.filter(|v| !v.is_empty()),
    ) else {
        return Err(ApiError::bad_request("Please add all fields"));
    };

    if app_state.user_repo.find_by_email(&email).await?.is_some() {
        return Err(ApiError::bad_request("User already exists"));
    }

    let password_hash = hash_password(&password).map_err(|e| {
        tracing::error!("Failed to hash password: {}", e);
        ApiError::internal("Failed to create user")
    })?;

    let user = User {
        id: Uuid::new_v4(),
        name,
        email,
        password_hash,
        created_at: Utc::now(),
    };
    app_state.user_repo.insert_user(&user).await?;

    let token = app_state.token_issuer.issue(user.id)?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

#[instrument(name = "login", skip(app_state, payload))]
async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (Some(email), Some(password)) = (
        payload.email.filter(|v| !v.trim().is_empty()),
        payload.password.filter(|v| !v.is_empty()),
    ) else {
        return Err(ApiError::bad_request("Please add all fields"));
    };

    // Same response for unknown email and bad password.
    let user = app_state
        .user_repo
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !verify_password(&password, &user.password_hash) {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = app_state.token_issuer.issue(user.id)?;

    Ok(Json(AuthResponse { token, user }))
}
