//! Store health checks.

use telemetry::health;
use tracing::{debug, error};

use crate::store::ContactStore;

/// Pings the store and records the outcome in the health registry.
pub async fn check_connection(store: &dyn ContactStore) -> bool {
    match store.ping().await {
        Ok(()) => {
            if !health().store.is_healthy() {
                debug!(backend = store.backend(), "Store connection healthy");
            }
            health().store.set_healthy();
            true
        }
        Err(e) => {
            error!(backend = store.backend(), "Store health check failed: {}", e);
            health().store.set_unhealthy(e.to_string());
            false
        }
    }
}
