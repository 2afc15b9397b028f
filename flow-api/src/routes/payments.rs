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
    domain::{assert_owner, Payment, PaymentStatus, PaymentWithProject, UpdatePayment},
    repositories::{PaymentRepository, ProjectRepository},
};

use super::{ApiError, Deleted};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payments).post(create_payment))
        .route("/:id", patch(update_payment).delete(delete_payment))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePayment {
    project_id: Option<Uuid>,
    amount: Option<f64>,
    due_date: Option<DateTime<Utc>>,
    status: Option<PaymentStatus>,
    paid_date: Option<DateTime<Utc>>,
}

#[instrument(name = "list_payments", skip(app_state))]
async fn list_payments(
    user: AuthUser,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<PaymentWithProject>>, ApiError> {
    let payments = app_state
        .payment_repo
        .list_payments_with_project(user.id)
        .await?;
    Ok(Json(payments))
}

#[instrument(name = "create_payment", skip(app_state, payload))]
async fn create_payment(
    user: AuthUser,
    State(app_state): State<AppState>,
    Json(payload): Json<CreatePayment>,
) -> Result<(StatusCode, Json<Payment>), ApiError> {
    let (Some(project_id), Some(amount), Some(due_date)) =
        (payload.project_id, payload.amount, payload.due_date)
    else {
        return Err(ApiError::bad_request("Please add all required fields"));
    };

    let project = app_state
        .project_repo
        .find_project(project_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Project not found"))?;
    if project.user_id != user.id {
        return Err(ApiError::unauthorized(
            "User not authorized to add payment to this project",
        ));
    }

    let payment = Payment::new(
        user.id,
        project_id,
        amount,
        due_date,
        payload.status,
        payload.paid_date,
        Utc::now(),
    );
    app_state.payment_repo.insert_payment(&payment).await?;

    Ok((StatusCode::CREATED, Json(payment)))
}

#[instrument(name = "update_payment", skip(app_state, update))]
async fn update_payment(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdatePayment>,
) -> Result<Json<Payment>, ApiError> {
    let payment = app_state.payment_repo.find_payment(id).await?;
    let mut payment = assert_owner(payment, user.id)?;

    payment.apply_update(update, Utc::now());
    app_state.payment_repo.update_payment(&payment).await?;

    Ok(Json(payment))
}

#[instrument(name = "delete_payment", skip(app_state))]
async fn delete_payment(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Deleted>, ApiError> {
    let payment = app_state.payment_repo.find_payment(id).await?;
    let payment = assert_owner(payment, user.id)?;

    app_state.payment_repo.delete_payment(payment.id).await?;

    Ok(Json(Deleted { id: payment.id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    use crate::app_state::test_state;
    use crate::domain::{Project, ProjectStatus};
    use crate::repositories::MockDatabase;

    async fn seed_project(db: &MockDatabase, owner: Uuid) -> Project {
        let project = Project {
            id: Uuid::new_v4(),
            user_id: owner,
            client_id: Uuid::new_v4(),
            title: "Website redesign".to_string(),
            deadline: Utc::now(),
            budget: 4500.0,
            status: ProjectStatus::Active,
            created_at: Utc::now(),
        };
        db.insert_project(&project).await.unwrap();
        project
    }

    fn payload(project_id: Uuid) -> CreatePayment {
        CreatePayment {
            project_id: Some(project_id),
            amount: Some(250.0),
            due_date: Some(Utc::now()),
            status: None,
            paid_date: None,
        }
    }

    #[tokio::test]
    async fn create_then_list_resolves_project_title() {
        let (state, db) = test_state();
        let user = AuthUser { id: Uuid::new_v4() };
        let project = seed_project(&db, user.id).await;

        let (status, Json(created)) =
            create_payment(user, State(state.clone()), Json(payload(project.id)))
                .await
                .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.status, PaymentStatus::Unpaid);
        assert_eq!(created.user_id, user.id);

        let Json(listed) = list_payments(user, State(state)).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].project_title.as_deref(), Some("Website redesign"));
    }

    #[tokio::test]
    async fn create_without_due_date_is_rejected() {
        let (state, db) = test_state();
        let user = AuthUser { id: Uuid::new_v4() };
        let project = seed_project(&db, user.id).await;

        let mut incomplete = payload(project.id);
        incomplete.due_date = None;

        let err = create_payment(user, State(state), Json(incomplete))
            .await
            .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(db.payment_count(), 0);
    }

    #[tokio::test]
    async fn create_against_foreign_project_is_unauthorized_and_persists_nothing() {
        let (state, db) = test_state();
        let user = AuthUser { id: Uuid::new_v4() };
        let foreign_project = seed_project(&db, Uuid::new_v4()).await;

        let err = create_payment(user, State(state), Json(payload(foreign_project.id)))
            .await
            .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(db.payment_count(), 0);
    }

    #[tokio::test]
    async fn create_against_missing_project_is_not_found() {
        let (state, _) = test_state();
        let user = AuthUser { id: Uuid::new_v4() };

        let err = create_payment(user, State(state), Json(payload(Uuid::new_v4())))
            .await
            .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn marking_paid_stamps_paid_date_and_reverting_clears_it() {
        let (state, db) = test_state();
        let user = AuthUser { id: Uuid::new_v4() };
        let project = seed_project(&db, user.id).await;

        let (_, Json(created)) =
            create_payment(user, State(state.clone()), Json(payload(project.id)))
                .await
                .unwrap();
        assert_eq!(created.paid_date, None);

        let Json(paid) = update_payment(
            user,
            State(state.clone()),
            Path(created.id),
            Json(UpdatePayment {
                status: Some(PaymentStatus::Paid),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(paid.status, PaymentStatus::Paid);
        assert!(paid.paid_date.is_some());

        let Json(reverted) = update_payment(
            user,
            State(state),
            Path(created.id),
            Json(UpdatePayment {
                status: Some(PaymentStatus::Unpaid),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(reverted.status, PaymentStatus::Unpaid);
        assert_eq!(reverted.paid_date, None);
    }

    #[tokio::test]
    async fn owner_survives_updates() {
        let (state, db) = test_state();
        let user = AuthUser { id: Uuid::new_v4() };
        let project = seed_project(&db, user.id).await;

        let (_, Json(created)) =
            create_payment(user, State(state.clone()), Json(payload(project.id)))
                .await
                .unwrap();

        let Json(updated) = update_payment(
            user,
            State(state),
            Path(created.id),
            Json(UpdatePayment {
                amount: Some(400.0),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

        assert_eq!(updated.user_id, user.id);
        assert_eq!(updated.amount, 400.0);
    }

    #[tokio::test]
    async fn update_by_non_owner_is_unauthorized() {
        let (state, db) = test_state();
        let owner = AuthUser { id: Uuid::new_v4() };
        let intruder = AuthUser { id: Uuid::new_v4() };
        let project = seed_project(&db, owner.id).await;

        let (_, Json(created)) =
            create_payment(owner, State(state.clone()), Json(payload(project.id)))
                .await
                .unwrap();

        let err = update_payment(
            intruder,
            State(state),
            Path(created.id),
            Json(UpdatePayment {
                status: Some(PaymentStatus::Paid),
                ..Default::default()
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn delete_by_non_owner_keeps_the_payment() {
        let (state, db) = test_state();
        let owner = AuthUser { id: Uuid::new_v4() };
        let intruder = AuthUser { id: Uuid::new_v4() };
        let project = seed_project(&db, owner.id).await;

        let (_, Json(created)) =
            create_payment(owner, State(state.clone()), Json(payload(project.id)))
                .await
                .unwrap();

        let err = delete_payment(intruder, State(state), Path(created.id))
            .await
            .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(db.payment_count(), 1);
    }

    #[tokio::test]
    async fn list_is_empty_for_a_fresh_user() {
        let (state, _) = test_state();
        let user = AuthUser { id: Uuid::new_v4() };

        let Json(listed) = list_payments(user, State(state)).await.unwrap();
        assert!(listed.is_empty());
    }
}
