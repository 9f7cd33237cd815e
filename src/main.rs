//! ContactUs service
//!
//! REST backend for contact requests:
//! - Schema validation reporting every failing field
//! - Read-through record cache with a short TTL
//! - Paged listing over a PostgreSQL JSONB table or an in-memory store

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};

use api::{router, ApiConfig, AppState, CacheConfig, RecordCache};
use contact_store::{health::check_connection, ContactStore, StoreBackend, StoreConfig};
use telemetry::{init_tracing_from_env, metrics};

/// Interval between background store health checks.
const HEALTH_CHECK_INTERVAL: Duration = Duration::from_secs(30);

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    /// Prefix the contact routes are mounted under
    #[serde(default = "default_path_prefix")]
    path_prefix: String,

    /// Upper bound on each store call
    #[serde(default = "default_request_timeout_ms")]
    request_timeout_ms: u64,

    /// Accepted bearer tokens; empty leaves the contact routes open
    #[serde(default)]
    auth_tokens: Vec<String>,

    #[serde(default)]
    store: StoreConfig,

    #[serde(default)]
    cache: CacheConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_path_prefix() -> String {
    ApiConfig::default().path_prefix
}

fn default_request_timeout_ms() -> u64 {
    ApiConfig::default().request_timeout_ms
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            path_prefix: default_path_prefix(),
            request_timeout_ms: default_request_timeout_ms(),
            auth_tokens: Vec::new(),
            store: StoreConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Config {
    fn api(&self) -> ApiConfig {
        ApiConfig {
            path_prefix: self.path_prefix.clone(),
            request_timeout_ms: self.request_timeout_ms,
            auth_tokens: self.auth_tokens.clone(),
            cache: self.cache.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing_from_env();

    info!("Starting ContactUs service v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;

    info!(
        backend = ?config.store.backend,
        path_prefix = %config.path_prefix,
        cache_ttl_secs = config.cache.ttl_secs,
        auth = !config.auth_tokens.is_empty(),
        "Loaded config"
    );

    let store = contact_store::connect(&config.store)
        .await
        .context("Failed to connect to the contact store")?;

    if check_connection(store.as_ref()).await {
        info!(backend = store.backend(), "Store connection: healthy");
    } else {
        error!(backend = store.backend(), "Store connection: unhealthy");
    }

    let state = AppState::new(store.clone(), &config.api());
    let cache = state.service.cache().clone();

    let _health_handle = start_health_check(store.clone(), cache.clone());

    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down...");

    cache.flush().await;
    store.close().await;

    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        .add_source(config::Config::try_from(&Config::default())?)
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("CONTACT")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("auth_tokens"),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Single-underscore spellings for nested keys
    if let Ok(url) = std::env::var("CONTACT_STORE_URL") {
        config.store.url = url;
        if std::env::var("CONTACT_STORE_BACKEND").is_err() {
            config.store.backend = StoreBackend::Postgres;
        }
    }
    if let Ok(backend) = std::env::var("CONTACT_STORE_BACKEND") {
        config.store.backend = match backend.to_lowercase().as_str() {
            "postgres" | "postgresql" => StoreBackend::Postgres,
            "memory" => StoreBackend::Memory,
            other => anyhow::bail!("Unknown store backend: {}", other),
        };
    }
    if let Ok(tokens) = std::env::var("CONTACT_AUTH_TOKENS") {
        config.auth_tokens = tokens
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }
    if let Ok(ttl) = std::env::var("CONTACT_CACHE_TTL_SECS") {
        config.cache.ttl_secs = ttl
            .parse()
            .context("CONTACT_CACHE_TTL_SECS must be a whole number of seconds")?;
    }

    Ok(config)
}

/// Re-checks the store so readiness tracks outages after startup, and logs
/// a metrics snapshot on the same tick.
fn start_health_check(
    store: Arc<dyn ContactStore>,
    cache: RecordCache,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(HEALTH_CHECK_INTERVAL);
        // The first tick fires immediately and startup already checked.
        interval.tick().await;
        loop {
            interval.tick().await;
            check_connection(store.as_ref()).await;

            metrics().cache_entries.set(cache.entry_count());
            let snapshot = metrics().snapshot();
            info!(
                requests = snapshot.requests,
                created = snapshot.records_created,
                validation_failures = snapshot.validation_failures,
                store_errors = snapshot.store_errors,
                store_timeouts = snapshot.store_timeouts,
                cache_hits = snapshot.cache_hits,
                cache_misses = snapshot.cache_misses,
                cache_entries = snapshot.cache_entries,
                store_latency_mean_ms = snapshot.store_latency_mean_ms,
                store_latency_max_ms = snapshot.store_latency_max_ms,
                "Metrics"
            );
        }
    })
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
