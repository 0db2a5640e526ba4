mod config;
mod error;
mod extract;
mod rate_limit;
mod server;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use weinly_core::openai::{OpenAiClient, OpenAiClientConfig};
use weinly_core::redis::RedisCache;
use weinly_core::requests::RequestArchive;
use weinly_core::suppliers;

use config::Config;
use server::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("starting weinly server");

    // 1. Load config from environment
    let config = Config::from_env()?;
    info!(
        bind_addr = %config.bind_addr,
        redis = config.redis_url.is_some(),
        catalog_file = config.catalog_path.is_some(),
        "configuration loaded"
    );

    let openai_config = OpenAiClientConfig::from_env()?;
    info!(
        base_url = %openai_config.base_url,
        model = %openai_config.model,
        timeout_ms = openai_config.default_timeout.as_millis(),
        "openai client configured"
    );
    let openai = Arc::new(OpenAiClient::new(openai_config)?);

    // 2. Connect to Redis (optional — graceful degradation if unavailable)
    let redis_cache = RedisCache::new(config.redis_url.as_deref());
    if redis_cache.is_available().await {
        info!("redis connected");
    } else {
        info!("redis unavailable, running without request archive");
    }
    let archive = Arc::new(RequestArchive::new(redis_cache, config.request_ttl_secs));

    // 3. Load the supplier catalog once; it is immutable for the process lifetime
    let catalog = match &config.catalog_path {
        Some(path) => suppliers::load_catalog(std::path::Path::new(path))?,
        None => suppliers::builtin_catalog(),
    };
    info!(suppliers = catalog.len(), "supplier catalog loaded");
    let catalog = Arc::new(catalog);

    let limiter = rate_limit::RateLimiter::from_env();
    if limiter.is_some() {
        info!("rate limiter enabled");
    }

    // 4. Build router and serve
    let state = AppState {
        openai,
        catalog,
        archive,
        limiter,
    };
    let app = server::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "HTTP server ready");
    axum::serve(listener, app).await?;

    Ok(())
}
