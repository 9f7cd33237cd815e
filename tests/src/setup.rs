//! Common test setup functions.

use api::{router, ApiConfig, AppState, CacheConfig, RecordCache};
use axum::Router;
use contact_store::ContactStore;
use std::sync::Arc;
use std::time::Duration;

use crate::mocks::MockStore;

/// Test context over a mock store and the real router.
///
/// - Uses the real Axum router with all middleware
/// - Uses `MockStore`, which delegates to `MemoryStore`, for persistence
pub struct TestContext {
    pub store: MockStore,
    pub state: AppState,
    pub router: Router,
}

impl TestContext {
    /// Context with default settings: open routes, 3 s cache TTL.
    pub fn new() -> Self {
        Self::with_config(ApiConfig::default())
    }

    /// Context whose contact routes require one of `tokens`.
    pub fn with_auth_tokens(tokens: &[&str]) -> Self {
        Self::with_config(ApiConfig {
            auth_tokens: tokens.iter().map(|t| t.to_string()).collect(),
            ..ApiConfig::default()
        })
    }

    /// Context with a custom cache TTL.
    pub fn with_cache_ttl(ttl: Duration) -> Self {
        let config = ApiConfig::default();
        let store = MockStore::new();
        let cache = RecordCache::with_ttl(ttl, CacheConfig::default().max_capacity);
        let state = AppState::with_cache(
            Arc::new(store.clone()) as Arc<dyn ContactStore>,
            cache,
            &config,
        );
        Self::assemble(store, state)
    }

    /// Context with a custom per-call store timeout.
    pub fn with_request_timeout(timeout: Duration) -> Self {
        Self::with_config(ApiConfig {
            request_timeout_ms: timeout.as_millis() as u64,
            ..ApiConfig::default()
        })
    }

    pub fn with_config(config: ApiConfig) -> Self {
        let store = MockStore::new();
        let state = AppState::new(Arc::new(store.clone()) as Arc<dyn ContactStore>, &config);
        Self::assemble(store, state)
    }

    fn assemble(store: MockStore, state: AppState) -> Self {
        let router = router(state.clone());
        Self {
            store,
            state,
            router,
        }
    }

    /// Number of records in the backing store.
    pub fn stored_count(&self) -> usize {
        self.store.inner().all().len()
    }

    /// Set the store to fail (for error testing).
    pub fn set_store_failure(&self, should_fail: bool) {
        self.store.set_should_fail(should_fail);
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
