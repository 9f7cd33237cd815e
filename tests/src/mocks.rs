//! Mock implementations for testing.

use async_trait::async_trait;
use contact_core::error::DbErrorCode;
use contact_core::{ContactFilter, ContactId, ContactRecord, ContactUs, Error, Result};
use contact_store::{ContactStore, MemoryStore};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Store wrapper with switchable failure, artificial latency and call counts.
///
/// Delegates to a `MemoryStore`, so the same production code paths run as
/// with the real in-memory backend.
#[derive(Clone)]
pub struct MockStore {
    inner: Arc<MemoryStore>,
    /// Simulate persistence failures if set.
    should_fail: Arc<Mutex<bool>>,
    /// Delay applied before every call.
    delay: Arc<Mutex<Option<Duration>>>,
    find_by_id_calls: Arc<AtomicU64>,
    count_calls: Arc<AtomicU64>,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MemoryStore::new()),
            should_fail: Arc::new(Mutex::new(false)),
            delay: Arc::new(Mutex::new(None)),
            find_by_id_calls: Arc::new(AtomicU64::new(0)),
            count_calls: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The backing store, for writes that bypass the API (and its cache).
    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    /// Set failure mode for testing error handling.
    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock() = fail;
    }

    /// Delay every call by `delay` (None to disable).
    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock() = delay;
    }

    /// How many times `find_by_id` reached the store.
    pub fn find_by_id_calls(&self) -> u64 {
        self.find_by_id_calls.load(Ordering::SeqCst)
    }

    /// How many times `count` reached the store.
    pub fn count_calls(&self) -> u64 {
        self.count_calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> Result<()> {
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.should_fail.lock() {
            return Err(Error::database(
                DbErrorCode::OperationFailed,
                "Mock store failure: connection refused",
            ));
        }
        Ok(())
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactStore for MockStore {
    async fn find(&self, filter: &ContactFilter) -> Result<Vec<ContactRecord>> {
        self.enter().await?;
        self.inner.find(filter).await
    }

    async fn find_by_id(&self, id: &ContactId) -> Result<Option<ContactRecord>> {
        self.find_by_id_calls.fetch_add(1, Ordering::SeqCst);
        self.enter().await?;
        self.inner.find_by_id(id).await
    }

    async fn count(&self) -> Result<u64> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        self.enter().await?;
        self.inner.count().await
    }

    async fn page(&self, offset: u64, limit: u64) -> Result<Vec<ContactRecord>> {
        self.enter().await?;
        self.inner.page(offset, limit).await
    }

    async fn insert(&self, contact: ContactUs) -> Result<ContactRecord> {
        self.enter().await?;
        self.inner.insert(contact).await
    }

    async fn apply_patch(&self, id: &ContactId, patch: &Value) -> Result<Option<ContactRecord>> {
        self.enter().await?;
        self.inner.apply_patch(id, patch).await
    }

    async fn replace(&self, record: &ContactRecord) -> Result<bool> {
        self.enter().await?;
        self.inner.replace(record).await
    }

    async fn delete(&self, id: &ContactId) -> Result<bool> {
        self.enter().await?;
        self.inner.delete(id).await
    }

    async fn delete_many(&self, ids: &[ContactId]) -> Result<u64> {
        self.enter().await?;
        self.inner.delete_many(ids).await
    }

    async fn ping(&self) -> Result<()> {
        self.enter().await
    }

    fn backend(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_store_counts_and_fails() {
        let store = MockStore::new();
        assert_eq!(store.count().await.unwrap(), 0);
        assert!(store.find_by_id(&ContactId::generate()).await.unwrap().is_none());
        assert_eq!(store.count_calls(), 1);
        assert_eq!(store.find_by_id_calls(), 1);

        store.set_should_fail(true);
        assert!(store.ping().await.is_err());
        store.set_should_fail(false);
        assert!(store.ping().await.is_ok());
    }
}
