use std::sync::Arc;
use std::time::Duration;

use account_service::config::Config;
use account_service::domain::account::service::AccountService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::PostgresAccountRepository;
use account_service::outbound::AuthCredentialService;
use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        request_timeout_secs = config.server.request_timeout_secs,
        token_ttl_minutes = config.jwt.expiration_minutes,
        "Configuration loaded"
    );

    // Key material is decoded exactly once; any failure here aborts startup.
    let authenticator = Arc::new(Authenticator::from_pem(
        config.jwt.private_key.as_bytes(),
        config.jwt.public_key.as_bytes(),
        chrono::Duration::minutes(config.jwt.expiration_minutes),
        config.password.into(),
    )?);
    tracing::info!(algorithm = "RS256", "Signing keys loaded");

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool));
    let credential_service = Arc::new(AuthCredentialService::new(authenticator));
    let account_service = Arc::new(AccountService::new(account_repository, credential_service));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        account_service,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
