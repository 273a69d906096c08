use campus_gate::{
    accounts::{AccountService, InMemoryAccountRepository},
    build_router, AppConfig, AppState,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campus_gate=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting campus portal gateway");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let account_repository = Arc::new(InMemoryAccountRepository::new());

    if let Some(seed) = &config.seed_admin {
        let service = AccountService::new(account_repository.clone(), config.password_hash_cost);
        if let Err(e) = service.seed_super_admin(&seed.email, &seed.password).await {
            error!(error = %e, "Failed to seed super admin");
            std::process::exit(1);
        }
    }

    let app_state = AppState::from_config(&config, account_repository);
    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .unwrap();
    info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await.unwrap();
}
