//! Store construction from configuration.

use std::sync::Arc;

use contact_core::Result;
use tracing::info;

use crate::config::{StoreBackend, StoreConfig};
use crate::memory::MemoryStore;
use crate::postgres::PgStore;
use crate::store::ContactStore;

/// Opens the configured backend. For PostgreSQL this connects the pool and
/// ensures the schema exists.
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn ContactStore>> {
    let store: Arc<dyn ContactStore> = match config.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Postgres => {
            let store = PgStore::connect(config).await?;
            store.init_schema().await?;
            Arc::new(store)
        }
    };

    info!(backend = store.backend(), "Contact store ready");
    Ok(store)
}
