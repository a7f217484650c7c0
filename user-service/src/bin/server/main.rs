use std::sync::Arc;

use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_service::config::Config;
use user_service::domain::profile::ports::ProfileServicePort;
use user_service::domain::profile::service::ProfileService;
use user_service::domain::user::ports::UserServicePort;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::InMemoryProfileRepository;
use user_service::outbound::repositories::InMemoryUserRepository;
use user_service::outbound::repositories::PostgresProfileRepository;
use user_service::outbound::repositories::PostgresUserRepository;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "user-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        storage = if config.database.url.is_some() { "postgresql" } else { "memory" },
        token_ttl_seconds = config.jwt.expiration_seconds,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        config.jwt.token_ttl(),
    )?);

    let (user_service, profile_service): (Arc<dyn UserServicePort>, Arc<dyn ProfileServicePort>) =
        match &config.database.url {
            Some(url) => {
                let pg_pool = PgPoolOptions::new()
                    .max_connections(5)
                    .connect(url)
                    .await?;
                tracing::info!(
                    max_connections = 5,
                    database = "postgresql",
                    "Database connection pool created"
                );

                sqlx::migrate!("./migrations").run(&pg_pool).await?;
                tracing::info!(database = "postgresql", "Database migrations completed");

                let users = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
                let profiles = Arc::new(PostgresProfileRepository::new(pg_pool));
                (
                    Arc::new(UserService::new(Arc::clone(&users))),
                    Arc::new(ProfileService::new(profiles, users)),
                )
            }
            None => {
                tracing::warn!("No database configured, data is kept in memory only");

                let users = Arc::new(InMemoryUserRepository::new());
                let profiles = Arc::new(InMemoryProfileRepository::new());
                (
                    Arc::new(UserService::new(Arc::clone(&users))),
                    Arc::new(ProfileService::new(profiles, users)),
                )
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

    let http_application = create_router(user_service, profile_service, authenticator);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
