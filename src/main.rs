use std::sync::Arc;

use user_service::{
    app::{build_app, serve},
    config::AppConfig,
    db,
    state::AppState,
    users::{repo::PgUserRepository, service::Users},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "user_service=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = Arc::new(AppConfig::from_env()?);
    let pool = db::connect(&config.database_url, &config.pool).await?;

    let repo = Arc::new(PgUserRepository::new(pool));
    let service = Arc::new(Users::new(repo));
    let state = AppState::new(config.clone(), service);

    serve(build_app(state), config.listen_addr).await
}
