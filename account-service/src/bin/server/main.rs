use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::session::service::SessionService;
use account_service::inbound::http::cookies::CookieSettings;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryUserRepository;
use account_service::outbound::repositories::PostgresUserRepository;
use auth::TokenCodec;
use axum::Router;
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
        database_configured = config.database.is_some(),
        access_ttl_minutes = config.jwt.access_ttl_minutes,
        refresh_ttl_days = config.jwt.refresh_ttl_days,
        cookie_secure = config.cookie.secure,
        "Configuration loaded"
    );

    // Invalid token or hashing settings are fatal here, never per request
    let token_codec = Arc::new(TokenCodec::new(config.jwt.codec_config()?)?);
    let password_hasher = config.password.hasher()?;
    let cookie_settings = CookieSettings::from(&config.cookie);

    let http_application: Router = match &config.database {
        Some(database) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .connect(&database.url)
                .await?;
            tracing::info!(
                max_connections = database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
            let session_service = Arc::new(SessionService::new(
                user_repository,
                Arc::clone(&token_codec),
                password_hasher,
            ));

            create_router(session_service, token_codec, cookie_settings)
        }
        None => {
            tracing::warn!("No database configured, accounts are kept in memory");

            let user_repository = Arc::new(InMemoryUserRepository::new());
            let session_service = Arc::new(SessionService::new(
                user_repository,
                Arc::clone(&token_codec),
                password_hasher,
            ));

            create_router(session_service, token_codec, cookie_settings)
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
