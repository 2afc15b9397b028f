use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::{
    auth::TokenIssuer,
    config::AuthSettings,
    repositories::{
        ClientRepository, ClientRepositoryImpl, PaymentRepository, PaymentRepositoryImpl,
        ProjectRepository, ProjectRepositoryImpl, UserRepository, UserRepositoryImpl,
    },
};

/// Shared request state: one handle per store plus the token issuer. The
/// repositories are trait objects so tests can swap in the in-memory store.
#[derive(Clone)]
pub struct AppState {
    pub user_repo: Arc<dyn UserRepository>,
    pub client_repo: Arc<dyn ClientRepository>,
    pub project_repo: Arc<dyn ProjectRepository>,
    pub payment_repo: Arc<dyn PaymentRepository>,
    pub token_issuer: TokenIssuer,
}

impl AppState {
    pub fn new(pool: PgPool, auth: &AuthSettings) -> Self {
        Self {
            user_repo: Arc::new(UserRepositoryImpl::new(pool.clone())),
            client_repo: Arc::new(ClientRepositoryImpl::new(pool.clone())),
            project_repo: Arc::new(ProjectRepositoryImpl::new(pool.clone())),
            payment_repo: Arc::new(PaymentRepositoryImpl::new(pool)),
            token_issuer: TokenIssuer::from_settings(auth),
        }
    }
}

impl FromRef<AppState> for TokenIssuer {
    fn from_ref(state: &AppState) -> Self {
        state.token_issuer.clone()
    }
}

/// State over a shared [`MockDatabase`]; the returned handle sees every write
/// the handlers make.
#[cfg(test)]
pub fn test_state() -> (AppState, crate::repositories::MockDatabase) {
    let db = crate::repositories::MockDatabase::new();
    let state = AppState {
        user_repo: Arc::new(db.clone()),
        client_repo: Arc::new(db.clone()),
        project_repo: Arc::new(db.clone()),
        payment_repo: Arc::new(db.clone()),
        token_issuer: TokenIssuer::new("test-secret", 24),
    };
    (state, db)
}
