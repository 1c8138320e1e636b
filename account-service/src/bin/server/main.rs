use std::sync::Arc;

use account_service::account::models::Scope;
use account_service::account::ports::AccountServicePort;
use account_service::account::ports::UserRepository;
use account_service::account::service::AccountService;
use account_service::account::tokens::TokenIssuer;
use account_service::account::tokens::TokenLifetimes;
use account_service::config::Config;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryUserRepository;
use account_service::outbound::repositories::PostgresUserRepository;
use auth::JwtHandler;
use auth::PasswordHasher;
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
    let persistence = match config.database.url {
        Some(_) => "postgresql",
        None => "memory",
    };

    tracing::info!(
        http_port = config.server.http_port,
        persistence,
        access_token_ttl_seconds = config.jwt.access_token_ttl_seconds,
        refresh_token_ttl_seconds = config.jwt.refresh_token_ttl_seconds,
        hasher_memory_kib = config.hasher.memory_kib,
        hasher_iterations = config.hasher.iterations,
        "Configuration loaded"
    );

    let account_service = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new().max_connections(5).connect(url).await?;
            tracing::info!(
                max_connections = 5,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            build_account_service(Arc::new(PostgresUserRepository::new(pg_pool)), &config)?
        }
        None => {
            tracing::warn!("No database configured, users are kept in memory");
            build_account_service(Arc::new(InMemoryUserRepository::new()), &config)?
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

    axum::serve(http_listener, create_router(account_service)).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

fn build_account_service<UR: UserRepository>(
    repository: Arc<UR>,
    config: &Config,
) -> Result<Arc<dyn AccountServicePort>, anyhow::Error> {
    let hasher = Arc::new(PasswordHasher::with_params((&config.hasher).into())?);
    let signer = Arc::new(JwtHandler::new(config.jwt.secret.as_bytes()));
    let lifetimes = TokenLifetimes {
        access: chrono::Duration::seconds(config.jwt.access_token_ttl_seconds),
        refresh: chrono::Duration::seconds(config.jwt.refresh_token_ttl_seconds),
    };

    Ok(Arc::new(AccountService::new(
        repository,
        hasher,
        TokenIssuer::new(signer, lifetimes),
        Scope::new(&config.account.default_scope),
    )))
}
