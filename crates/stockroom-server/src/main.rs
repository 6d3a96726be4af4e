//! # Stockroom Server
//!
//! Main entry point for the Stockroom application.
//! Wires configuration, MySQL, Redis, and the REST router into one process.

use std::sync::Arc;

use async_trait::async_trait;
use stockroom_config::{AppConfig, ConfigLoader, ObservabilityConfig};
use stockroom_core::{StockroomError, StockroomResult};
use stockroom_repository::{
    create_pool, DatabasePool, MySqlItemRepository, MySqlUserRepository, UserRepository,
};
use stockroom_rest::{create_router, AppState, ReadinessProbe};
use stockroom_security::PasswordHasher;
use stockroom_service::{
    CacheInterface, ItemServiceImpl, RedisCacheService, TokenServiceImpl,
};
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // .env is optional; real deployments use environment variables directly
    let _ = dotenvy::dotenv();

    // Logging is configured from the observability section, so the
    // configuration has to load before the subscriber goes up.
    let config = match load_config().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.observability);

    info!("Starting Stockroom Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn load_config() -> StockroomResult<AppConfig> {
    let config_loader = ConfigLoader::from_default_location()?;
    Ok(config_loader.get().await)
}

/// Readiness backed by the database pool. The REST layer reports 503 on
/// `/health` when this probe fails.
struct DbReadiness {
    pool: Arc<DatabasePool>,
}

#[async_trait]
impl ReadinessProbe for DbReadiness {
    async fn ready(&self) -> StockroomResult<()> {
        self.pool.health_check().await
    }
}

async fn run(config: AppConfig) -> StockroomResult<()> {
    // Create database pool and run migrations
    let db_pool = create_pool(&config.database).await?;
    db_pool.run_migrations().await?;

    // Create Redis cache (no-op when disabled)
    let cache: Arc<dyn CacheInterface> = if config.redis.enabled {
        let redis_cfg = deadpool_redis::Config::from_url(&config.redis.url);
        let pool = redis_cfg
            .create_pool(Some(deadpool_redis::Runtime::Tokio1))
            .map_err(|e| {
                StockroomError::Cache(format!("Failed to create Redis pool: {}", e))
            })?;
        info!("Redis cache enabled at {}", config.redis.url);
        Arc::new(RedisCacheService::new(Arc::new(pool)))
    } else {
        warn!("Redis cache disabled; all reads will hit the store");
        Arc::new(RedisCacheService::disabled())
    };

    // Wire repositories and services
    let item_repository = Arc::new(MySqlItemRepository::new(Arc::clone(&db_pool)));
    let user_repository = Arc::new(MySqlUserRepository::new(Arc::clone(&db_pool)));

    let password_hasher = Arc::new(PasswordHasher::new());
    let security_config = Arc::new(config.security.clone());

    seed_bootstrap_user(&config, user_repository.as_ref(), &password_hasher).await?;

    let item_service = Arc::new(ItemServiceImpl::new(item_repository, cache, &config.cache));
    let token_service = Arc::new(TokenServiceImpl::new(
        user_repository,
        password_hasher,
        security_config,
    ));
    let token_provider = token_service.token_provider();

    let readiness: Arc<dyn ReadinessProbe> = Arc::new(DbReadiness {
        pool: Arc::clone(&db_pool),
    });

    let app_state = AppState::new(item_service, token_service);
    let router = create_router(app_state, token_provider, readiness, &config.server);

    // Start the REST server
    let addr = config.server.addr();
    info!("Starting REST server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| StockroomError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| StockroomError::Internal(format!("Server error: {}", e)))?;

    db_pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Creates the configured bootstrap user when the users table is empty.
///
/// Token issuance needs at least one account; without this a fresh
/// deployment has no way to obtain a token.
async fn seed_bootstrap_user(
    config: &AppConfig,
    user_repository: &MySqlUserRepository,
    password_hasher: &PasswordHasher,
) -> StockroomResult<()> {
    let (Some(username), Some(password)) = (
        config.security.bootstrap_username.as_ref(),
        config.security.bootstrap_password.as_ref(),
    ) else {
        return Ok(());
    };

    if user_repository.count().await? > 0 {
        return Ok(());
    }

    let password_hash = password_hasher.hash(password)?;
    let user = user_repository
        .insert(&stockroom_core::NewUser::new(username.clone(), password_hash))
        .await?;

    info!("Seeded bootstrap user '{}'", user.username);
    Ok(())
}

/// Initializes tracing from the observability section.
///
/// `RUST_LOG` takes precedence over the configured level; the log format
/// switches between pretty and JSON output.
fn init_logging(observability: &ObservabilityConfig) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&observability.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if observability.json_output() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
