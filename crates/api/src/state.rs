//! Application state shared across handlers.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use contact_store::ContactStore;
use serde::{Deserialize, Serialize};

use crate::cache::{CacheConfig, RecordCache};
use crate::service::ContactService;

/// HTTP-layer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Prefix the contact routes are mounted under
    #[serde(default = "default_path_prefix")]
    pub path_prefix: String,
    /// Upper bound on each store call, in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Accepted bearer tokens; empty leaves the routes open
    #[serde(default)]
    pub auth_tokens: Vec<String>,
    #[serde(default)]
    pub cache: CacheConfig,
}

fn default_path_prefix() -> String {
    "/contact-us".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            path_prefix: default_path_prefix(),
            request_timeout_ms: default_request_timeout_ms(),
            auth_tokens: Vec::new(),
            cache: CacheConfig::default(),
        }
    }
}

impl ApiConfig {
    /// The prefix with a leading slash and no trailing slash; empty means root.
    pub fn normalized_prefix(&self) -> String {
        let trimmed = self.path_prefix.trim().trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Contact request operations
    pub service: ContactService,
    /// Accepted bearer tokens
    pub auth_tokens: Arc<HashSet<String>>,
    /// Route prefix for the contact routes
    pub path_prefix: String,
}

impl AppState {
    /// Builds state around `store` with a cache constructed from `config`.
    pub fn new(store: Arc<dyn ContactStore>, config: &ApiConfig) -> Self {
        Self::with_cache(store, RecordCache::new(&config.cache), config)
    }

    /// Builds state with an explicitly constructed cache.
    pub fn with_cache(store: Arc<dyn ContactStore>, cache: RecordCache, config: &ApiConfig) -> Self {
        let service = ContactService::new(
            store,
            cache,
            Duration::from_millis(config.request_timeout_ms),
        );

        Self {
            service,
            auth_tokens: Arc::new(config.auth_tokens.iter().cloned().collect()),
            path_prefix: config.normalized_prefix(),
        }
    }
}
