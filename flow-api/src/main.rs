use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use flow_api::{app_state::AppState, config::read_config, router};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let settings = read_config().expect("Failed to read configuration");

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let pool = PgPoolOptions::new()
        .connect_with(settings.database.with_db())
        .await
        .expect("Failed to connect to Postgres");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let app = router::create(AppState::new(pool, &settings.auth));

    let address = format!(
        "{}:{}",
        settings.application.host, settings.application.port
    );
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {}: {}", address, e));

    tracing::info!("flow-api listening on {}", address);

    axum::serve(listener, app).await.expect("server");
}
