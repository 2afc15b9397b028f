use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{app_state::AppState, auth, routes};

pub fn create(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "flow-api" }))
        .route("/health", get(health))
        .nest("/auth", auth::router())
        .nest("/clients", routes::clients::router())
        .nest("/projects", routes::projects::router())
        .nest("/payments", routes::payments::router())
        .nest("/dashboard", routes::dashboard::router())
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
