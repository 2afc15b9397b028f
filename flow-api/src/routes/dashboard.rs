use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use crate::{
    app_state::AppState,
    auth::AuthUser,
    domain::DashboardStats,
    repositories::{ClientRepository, PaymentRepository, ProjectRepository},
};

use super::ApiError;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard_stats))
}

#[instrument(name = "dashboard_stats", skip(app_state))]
async fn dashboard_stats(
    user: AuthUser,
    State(app_state): State<AppState>,
) -> Result<Json<DashboardStats>, ApiError> {
    let payments = app_state.payment_repo.list_payments(user.id).await?;
    let active_projects = app_state
        .project_repo
        .count_active_projects(user.id)
        .await?;
    let total_clients = app_state.client_repo.count_clients(user.id).await?;

    Ok(Json(DashboardStats::compute(
        &payments,
        active_projects,
        total_clients,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::app_state::test_state;
    use crate::domain::{Client, Payment, PaymentStatus, Project, ProjectStatus};

    #[tokio::test]
    async fn aggregates_only_the_callers_records() {
        let (state, db) = test_state();
        let user = AuthUser { id: Uuid::new_v4() };
        let other = Uuid::new_v4();
        let now = Utc::now();

        let _db = db
            .with_clients(vec![Client {
                id: Uuid::new_v4(),
                user_id: user.id,
                name: "Nora".to_string(),
                email: "nora@example.com".to_string(),
                company: None,
                hourly_rate: None,
                notes: None,
                created_at: now,
            }])
            .with_projects(vec![
                Project {
                    id: Uuid::new_v4(),
                    user_id: user.id,
                    client_id: Uuid::new_v4(),
                    title: "Active one".to_string(),
                    deadline: now,
                    budget: 1000.0,
                    status: ProjectStatus::Active,
                    created_at: now,
                },
                Project {
                    id: Uuid::new_v4(),
                    user_id: user.id,
                    client_id: Uuid::new_v4(),
                    title: "Done one".to_string(),
                    deadline: now,
                    budget: 1000.0,
                    status: ProjectStatus::Completed,
                    created_at: now,
                },
            ])
            .with_payments(vec![
                Payment::new(
                    user.id,
                    Uuid::new_v4(),
                    100.0,
                    now,
                    Some(PaymentStatus::Paid),
                    None,
                    now,
                ),
                Payment::new(user.id, Uuid::new_v4(), 50.0, now, None, None, now),
                // Someone else's paid payment must not leak into the stats.
                Payment::new(
                    other,
                    Uuid::new_v4(),
                    999.0,
                    now,
                    Some(PaymentStatus::Paid),
                    None,
                    now,
                ),
            ]);

        let Json(stats) = dashboard_stats(user, State(state)).await.unwrap();

        assert_eq!(stats.total_revenue, 100.0);
        assert_eq!(stats.pending_amount, 50.0);
        assert_eq!(stats.active_projects_count, 1);
        assert_eq!(stats.total_clients_count, 1);
    }

    #[tokio::test]
    async fn fresh_user_gets_all_zeroes() {
        let (state, _) = test_state();
        let user = AuthUser { id: Uuid::new_v4() };

        let Json(stats) = dashboard_stats(user, State(state)).await.unwrap();

        assert_eq!(stats.total_revenue, 0.0);
        assert_eq!(stats.pending_amount, 0.0);
        assert_eq!(stats.active_projects_count, 0);
        assert_eq!(stats.total_clients_count, 0);
    }
}
