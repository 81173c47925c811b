use sm_auth::{TenantScopeResolver, TokenCodec};
use sm_cache::FileCache;
use sm_core::TenantHierarchy;
use sm_db::TenantHierarchyRepository;
use sm_config::ConfigError;
use sm_server::{
    AppState, CachedTenantHierarchy, ServerErrorResult, build_router, logger, maintenance,
};

use std::sync::Arc;

use log::{error, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ServerErrorResult<()> {
    // A missing .env is normal outside development
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        return Err(e.into());
    }

    // Load and validate configuration
    let config = sm_config::Config::load()?;
    config.validate()?;

    // Initialize logger (before any other logging)
    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;

    info!("Starting sm-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Database (migrations run on open)
    let database_path = config.database_path()?;
    let pool = sm_db::create_pool(&database_path, config.database.max_connections).await?;
    info!("Migrations complete");

    // Session tokens
    let Some(secret) = config.auth.jwt_secret.as_deref() else {
        return Err(ConfigError::auth("auth.jwt_secret is required").into());
    };
    let codec = Arc::new(TokenCodec::with_hs256(
        secret.as_bytes(),
        config.auth.token_ttl(),
    ));
    if config.auth.debug {
        warn!("auth.debug is ON - 401 responses include token decode errors");
    }

    // Tenant scoping, optionally cached
    let cache = FileCache::new(config.cache_dir()?, config.cache.default_ttl());
    let hierarchy_repo = TenantHierarchyRepository::new(pool.clone());
    let hierarchy: Arc<dyn TenantHierarchy> = match config.cache.tenant_scope_ttl() {
        Some(ttl) => {
            info!(
                "Tenant scope caching enabled ({})",
                humantime::format_duration(ttl)
            );
            Arc::new(CachedTenantHierarchy::new(hierarchy_repo, cache.clone(), ttl))
        }
        None => Arc::new(hierarchy_repo),
    };
    let resolver = TenantScopeResolver::new(hierarchy);

    let app_state = AppState::new(pool, codec, resolver, config.auth.debug);

    // Housekeeping
    maintenance::spawn_activity_log_retention(
        app_state.recorder.clone(),
        config.activity_log.retention_days,
        config.activity_log.cleanup_interval(),
    );
    if let Some(every) = config.cache.cleanup_interval() {
        maintenance::spawn_cache_cleanup(cache, every);
    }

    let app = build_router(app_state);

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;

    // Actual bound address (port 0 is auto-assigned)
    let actual_addr = listener.local_addr()?;
    info!("Server listening on {}", actual_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => {
            error!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
