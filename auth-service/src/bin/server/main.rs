use std::sync::Arc;

use auth_service::config::Config;
use auth_service::domain::credential::ports::CredentialServicePort;
use auth_service::domain::credential::service::CredentialService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::InMemoryCredentialRepository;
use auth_service::outbound::repositories::PostgresCredentialRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_seconds = config.jwt.ttl_seconds,
        storage_timeout_ms = config.database.timeout_ms,
        in_memory = config.database.is_in_memory(),
        "Configuration loaded"
    );

    let credential_service: Arc<dyn CredentialServicePort> = if config.database.is_in_memory() {
        tracing::warn!("Using in-memory credential store; credentials are lost on restart");

        let repository = Arc::new(InMemoryCredentialRepository::new());
        Arc::new(
            CredentialService::new(repository, &config.jwt)
                .with_storage_timeout(config.database.storage_timeout()),
        )
    } else {
        let pg_pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .acquire_timeout(config.database.storage_timeout())
            .connect(&config.database.url)
            .await?;
        tracing::info!(
            max_connections = config.database.max_connections,
            database = "postgresql",
            "Database connection pool created"
        );

        sqlx::migrate!("./migrations").run(&pg_pool).await?;
        tracing::info!(database = "postgresql", "Database migrations completed");

        let repository = Arc::new(PostgresCredentialRepository::new(pg_pool));
        Arc::new(
            CredentialService::new(repository, &config.jwt)
                .with_storage_timeout(config.database.storage_timeout()),
        )
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(credential_service);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
