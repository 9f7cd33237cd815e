//! The persistence seam for contact requests.

use async_trait::async_trait;
use contact_core::{ContactFilter, ContactId, ContactRecord, ContactUs, Result};
use serde_json::Value;

/// Document store for contact requests.
///
/// Each call is a single-document (or single-statement) operation; the store
/// is the only arbiter of write ordering. `find` and `page` return records in
/// insertion order so page windows are stable.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Records matching `filter`.
    async fn find(&self, filter: &ContactFilter) -> Result<Vec<ContactRecord>>;

    /// The record with `id`, if any.
    async fn find_by_id(&self, id: &ContactId) -> Result<Option<ContactRecord>>;

    /// Number of persisted records.
    async fn count(&self) -> Result<u64>;

    /// At most `limit` records after skipping `offset`.
    async fn page(&self, offset: u64, limit: u64) -> Result<Vec<ContactRecord>>;

    /// Persists a validated contact under a freshly generated id.
    async fn insert(&self, contact: ContactUs) -> Result<ContactRecord>;

    /// Merges `patch` into the stored document for `id`, validates the
    /// result and writes it, all as one step against concurrent writers.
    ///
    /// Returns `None` when no such record exists and `Error::Validation`
    /// when the merged document is invalid; nothing is written in either case.
    async fn apply_patch(&self, id: &ContactId, patch: &Value) -> Result<Option<ContactRecord>>;

    /// Replaces the stored document for `record.id`. Returns false when no
    /// such record exists (nothing is written).
    async fn replace(&self, record: &ContactRecord) -> Result<bool>;

    /// Removes one record. Returns false when it did not exist.
    async fn delete(&self, id: &ContactId) -> Result<bool>;

    /// Removes every record whose id is in `ids`. Returns how many went.
    async fn delete_many(&self, ids: &[ContactId]) -> Result<u64>;

    /// Round-trip to the backend.
    async fn ping(&self) -> Result<()>;

    /// Backend name for logs and health output.
    fn backend(&self) -> &'static str;

    /// Releases connections. Called once on shutdown.
    async fn close(&self) {}
}
