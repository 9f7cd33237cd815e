//! Contact request operations.
//!
//! `ContactService` orchestrates validation, paging and the record cache over
//! a `ContactStore`. HTTP handlers are thin adapters over these methods.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use contact_core::error::DbErrorCode;
use contact_core::{
    validate_contact, ContactFilter, ContactId, ContactRecord, Error, Pagination,
    Result,
};
use contact_store::ContactStore;
use serde_json::Value;
use telemetry::metrics;
use tracing::{debug, error, info, warn};

use crate::cache::RecordCache;

/// One page of records plus the authoritative total.
#[derive(Debug, Clone)]
pub struct Page {
    pub records: Vec<ContactRecord>,
    pub total: u64,
}

/// The contact request handler set.
#[derive(Clone)]
pub struct ContactService {
    store: Arc<dyn ContactStore>,
    cache: RecordCache,
    request_timeout: Duration,
}

impl ContactService {
    pub fn new(store: Arc<dyn ContactStore>, cache: RecordCache, request_timeout: Duration) -> Self {
        Self {
            store,
            cache,
            request_timeout,
        }
    }

    pub fn store(&self) -> &Arc<dyn ContactStore> {
        &self.store
    }

    pub fn cache(&self) -> &RecordCache {
        &self.cache
    }

    /// Runs one store call under the request timeout, recording latency.
    async fn call<T, F>(&self, op: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let start = Instant::now();
        let outcome = tokio::time::timeout(self.request_timeout, fut).await;
        metrics()
            .store_latency_ms
            .observe(start.elapsed().as_millis() as u64);

        match outcome {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                if e.is_persistence() {
                    metrics().store_errors.inc();
                    error!(operation = op, error = %e, "Store call failed");
                }
                Err(e)
            }
            Err(_) => {
                metrics().store_timeouts.inc();
                error!(
                    operation = op,
                    timeout_ms = self.request_timeout.as_millis() as u64,
                    "Store call timed out"
                );
                Err(Error::database(
                    DbErrorCode::Timeout,
                    format!("{} exceeded {}ms", op, self.request_timeout.as_millis()),
                ))
            }
        }
    }

    /// Records matching `filter` (all records for an empty filter).
    pub async fn list(&self, filter: &ContactFilter) -> Result<Vec<ContactRecord>> {
        metrics().list_requests.inc();
        let records = self.call("find", self.store.find(filter)).await?;
        debug!(matched = records.len(), "Listed contact requests");
        Ok(records)
    }

    /// One record by id, served through the read-through cache.
    pub async fn get(&self, id: ContactId) -> Result<ContactRecord> {
        metrics().get_requests.inc();
        let record = self
            .cache
            .get_or_load(id, || self.call("find_by_id", self.store.find_by_id(&id)))
            .await?;
        record.ok_or_else(|| Error::not_found(format!("contact request {}", id)))
    }

    /// Authoritative number of records.
    pub async fn count(&self) -> Result<u64> {
        metrics().count_requests.inc();
        self.call("count", self.store.count()).await
    }

    /// The page window described by `pagination`. A page past the end is
    /// empty, not an error.
    pub async fn paginate(&self, pagination: Pagination) -> Result<Page> {
        metrics().pagination_requests.inc();
        let total = self.call("count", self.store.count()).await?;

        let records = if pagination.is_within(total) {
            self.call(
                "page",
                self.store.page(pagination.offset(), pagination.limit()),
            )
            .await?
        } else {
            Vec::new()
        };

        Ok(Page { records, total })
    }

    /// Validates `body` and persists it under a new id.
    pub async fn create(&self, body: &Value) -> Result<ContactRecord> {
        metrics().create_requests.inc();
        let contact = validate_contact(body).map_err(|failure| {
            metrics().validation_failures.inc();
            warn!(errors = failure.errors().len(), "Rejected invalid contact request");
            Error::Validation(failure)
        })?;

        let record = self.call("insert", self.store.insert(contact)).await?;
        metrics().records_created.inc();
        info!(id = %record.id, "Contact request created");
        Ok(record)
    }

    /// Applies `patch` to the record with `id`.
    ///
    /// The store merges, validates and writes in one step, so concurrent
    /// patches of different fields both survive. Returns false when no such
    /// record exists, in which case nothing happens.
    pub async fn update(&self, id: ContactId, patch: &Value) -> Result<bool> {
        metrics().update_requests.inc();
        let outcome = self
            .call("apply_patch", self.store.apply_patch(&id, patch))
            .await;
        self.cache.invalidate(&id).await;

        match outcome {
            Ok(Some(_)) => {
                metrics().records_updated.inc();
                info!(id = %id, "Contact request updated");
                Ok(true)
            }
            Ok(None) => {
                debug!(id = %id, "Update of missing contact request ignored");
                Ok(false)
            }
            Err(Error::Validation(failure)) => {
                metrics().validation_failures.inc();
                warn!(id = %id, errors = failure.errors().len(), "Rejected invalid contact update");
                Err(Error::Validation(failure))
            }
            Err(e) => Err(e),
        }
    }

    /// Removes one record. Removing a missing id is a no-op.
    pub async fn delete(&self, id: ContactId) -> Result<bool> {
        metrics().delete_requests.inc();
        let removed = self.call("delete", self.store.delete(&id)).await?;
        self.cache.invalidate(&id).await;
        if removed {
            metrics().records_deleted.inc();
            info!(id = %id, "Contact request deleted");
        }
        Ok(removed)
    }

    /// Removes every record in `ids`, leaving all others untouched.
    pub async fn delete_many(&self, ids: &[ContactId]) -> Result<u64> {
        metrics().bulk_delete_requests.inc();
        if ids.is_empty() {
            return Ok(0);
        }

        let removed = self.call("delete_many", self.store.delete_many(ids)).await?;
        self.cache.invalidate_many(ids).await;
        metrics().records_deleted.inc_by(removed);
        info!(requested = ids.len(), removed, "Contact requests deleted");
        Ok(removed)
    }
}
