use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    app_state::AppState,
    auth::AuthUser,
    domain::{assert_owner, Client},
    repositories::ClientRepository,
};

use super::{ApiError, Deleted};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route("/:id", delete(delete_client))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateClient {
    name: Option<String>,
    email: Option<String>,
    company: Option<String>,
    hourly_rate: Option<f64>,
    notes: Option<String>,
}

#[instrument(name = "list_clients", skip(app_state))]
async fn list_clients(
    user: AuthUser,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Client>>, ApiError> {
    let clients = app_state.client_repo.list_clients(user.id).await?;
    Ok(Json(clients))
}

#[instrument(name = "create_client", skip(app_state, payload))]
async fn create_client(
    user: AuthUser,
    State(app_state): State<AppState>,
    Json(payload): Json<CreateClient>,
) -> Result<(StatusCode, Json<Client>), ApiError> {
    let (Some(name), Some(email)) = (
        payload.name.filter(|v| !v.trim().is_empty()),
        payload.email.filter(|v| !v.trim().is_empty()),
    ) else {
        return Err(ApiError::bad_request("Please add name and email"));
    };

    let client = Client {
        id: Uuid::new_v4(),
        user_id: user.id,
        name,
        email,
        company: payload.company,
        hourly_rate: payload.hourly_rate,
        notes: payload.notes,
        created_at: Utc::now(),
    };
    app_state.client_repo.insert_client(&client).await?;

    Ok((StatusCode::CREATED, Json(client)))
}

#[instrument(name = "delete_client", skip(app_state))]
async fn delete_client(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Deleted>, ApiError> {
    let client = app_state.client_repo.find_client(id).await?;
    let client = assert_owner(client, user.id)?;

    // No cascade: the client's projects and payments are left untouched.
    app_state.client_repo.delete_client(client.id).await?;

    Ok(Json(Deleted { id: client.id }))
}
