use crate::error::AppError;

const DEFAULT_REQUEST_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Server configuration loaded explicitly from environment variables.
///
/// The OpenAI client has its own env block (`OpenAiClientConfig::from_env`);
/// this covers everything else. Redis URL is optional; if absent, the server
/// runs without the request archive.
#[derive(Debug, Clone)]
pub struct Config {
    /// Socket address to bind, e.g. "0.0.0.0:8080".
    pub bind_addr: String,
    /// Redis connection URL (e.g. "redis://127.0.0.1:6379"). `None` disables archiving.
    pub redis_url: Option<String>,
    /// Path to a JSON supplier catalog. `None` uses the builtin catalog.
    pub catalog_path: Option<String>,
    /// TTL for archived requests in seconds.
    pub request_ttl_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `BIND_ADDR` (default "0.0.0.0:8080")
    /// - `REDIS_URL`: Redis connection string (omit to disable archiving)
    /// - `SUPPLIER_CATALOG_PATH`: JSON catalog file (omit for the builtin catalog)
    /// - `REQUEST_TTL_SECS` (default 30 days)
    pub fn from_env() -> Result<Self, AppError> {
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let redis_url = std::env::var("REDIS_URL").ok();

        let catalog_path = std::env::var("SUPPLIER_CATALOG_PATH").ok();
        if let Some(path) = &catalog_path {
            if !std::path::Path::new(path).exists() {
                return Err(AppError::Config(format!(
                    "SUPPLIER_CATALOG_PATH points at a missing file: {path}"
                )));
            }
        }

        let request_ttl_secs = std::env::var("REQUEST_TTL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TTL_SECS);

        Ok(Self {
            bind_addr,
            redis_url,
            catalog_path,
            request_ttl_secs,
        })
    }
}
