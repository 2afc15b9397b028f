use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    app_state::AppState,
    auth::AuthUser,
    domain::{assert_owner, Project, ProjectStatus, ProjectWithClient, UpdateProject},
    repositories::{ClientRepository, ProjectRepository},
};

use super::{ApiError, Deleted};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route("/:id", patch(update_project).delete(delete_project))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateProject {
    client_id: Option<Uuid>,
    title: Option<String>,
    deadline: Option<DateTime<Utc>>,
    budget: Option<f64>,
    status: Option<ProjectStatus>,
}

#[instrument(name = "list_projects", skip(app_state))]
async fn list_projects(
    user: AuthUser,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ProjectWithClient>>, ApiError> {
    let projects = app_state.project_repo.list_projects(user.id).await?;
    Ok(Json(projects))
}

#[instrument(name = "create_project", skip(app_state, payload))]
async fn create_project(
    user: AuthUser,
    State(app_state): State<AppState>,
    Json(payload): Json<CreateProject>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let (Some(client_id), Some(title), Some(deadline), Some(budget)) = (
        payload.client_id,
        payload.title.filter(|v| !v.trim().is_empty()),
        payload.deadline,
        payload.budget,
    ) else {
        return Err(ApiError::bad_request("Please add all required fields"));
    };

    check_client_owner(&app_state, client_id, user.id).await?;

    let project = Project {
        id: Uuid::new_v4(),
        user_id: user.id,
        client_id,
        title,
        deadline,
        budget,
        status: payload.status.unwrap_or(ProjectStatus::Active),
        created_at: Utc::now(),
    };
    app_state.project_repo.insert_project(&project).await?;

    Ok((StatusCode::CREATED, Json(project)))
}

#[instrument(name = "update_project", skip(app_state, update))]
async fn update_project(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdateProject>,
) -> Result<Json<Project>, ApiError> {
    let project = app_state.project_repo.find_project(id).await?;
    let mut project = assert_owner(project, user.id)?;

    if let Some(client_id) = update.client_id {
        check_client_owner(&app_state, client_id, user.id).await?;
    }

    project.apply_update(update);
    app_state.project_repo.update_project(&project).await?;

    Ok(Json(project))
}

#[instrument(name = "delete_project", skip(app_state))]
async fn delete_project(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Deleted>, ApiError> {
    let project = app_state.project_repo.find_project(id).await?;
    let project = assert_owner(project, user.id)?;

    // No cascade: payments referencing this project are left in place.
    app_state.project_repo.delete_project(project.id).await?;

    Ok(Json(Deleted { id: project.id }))
}

/// The referenced client must exist and belong to the caller, mirroring the
/// check payment creation performs on its project.
async fn check_client_owner(
    app_state: &AppState,
    client_id: Uuid,
    caller: Uuid,
) -> Result<(), ApiError> {
    let client = app_state.client_repo.find_client(client_id).await?;
    let client =
        client.ok_or_else(|| ApiError::not_found("Client not found"))?;
    if client.user_id != caller {
        return Err(ApiError::unauthorized(
            "User not authorized to add project to this client",
        ));
    }
    Ok(())
}
