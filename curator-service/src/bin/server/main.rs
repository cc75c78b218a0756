use std::sync::Arc;

use auth::Authenticator;
use auth::TokenCodec;
use curator_service::config::Config;
use curator_service::domain::content::service::ContentService;
use curator_service::domain::tag::service::TagService;
use curator_service::domain::user::service::UserService;
use curator_service::inbound::http::router::create_router;
use curator_service::outbound::repositories::PostgresContentRepository;
use curator_service::outbound::repositories::PostgresTagRepository;
use curator_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "curator_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "curator-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        algorithm = %config.auth.algorithm,
        access_token_ttl_minutes = config.auth.access_token_ttl_minutes,
        password_scheme = %config.auth.password_scheme,
        "Configuration loaded"
    );

    // Reject bad signing settings before touching the database or binding a socket
    let token_codec = Arc::new(TokenCodec::new(&config.auth.token_settings())?);
    let password_hasher = config.auth.password_hasher()?;
    let authenticator = Arc::new(Authenticator::new(
        password_hasher,
        Arc::clone(&token_codec),
    ));

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

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let tag_repository = Arc::new(PostgresTagRepository::new(pg_pool.clone()));
    let content_repository = Arc::new(PostgresContentRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(user_repository, authenticator));
    let tag_service = Arc::new(TagService::new(Arc::clone(&tag_repository)));
    let content_service = Arc::new(ContentService::new(content_repository, tag_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, content_service, tag_service, token_codec);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
