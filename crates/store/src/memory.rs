//! In-memory store.

use async_trait::async_trait;
use contact_core::{
    validate_update, ContactFilter, ContactId, ContactRecord, ContactUs, Error, Result,
};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

use crate::store::ContactStore;

/// Process-local store keeping records in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<ContactRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every record (for tests).
    pub fn all(&self) -> Vec<ContactRecord> {
        self.records.read().clone()
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn find(&self, filter: &ContactFilter) -> Result<Vec<ContactRecord>> {
        let records = self.records.read();
        Ok(records.iter().filter(|r| filter.matches(r)).cloned().collect())
    }

    async fn find_by_id(&self, id: &ContactId) -> Result<Option<ContactRecord>> {
        Ok(self.records.read().iter().find(|r| r.id == *id).cloned())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.records.read().len() as u64)
    }

    async fn page(&self, offset: u64, limit: u64) -> Result<Vec<ContactRecord>> {
        let records = self.records.read();
        Ok(records
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn insert(&self, contact: ContactUs) -> Result<ContactRecord> {
        let record = ContactRecord::new(ContactId::generate(), contact);
        self.records.write().push(record.clone());
        debug!(id = %record.id, "Inserted contact request");
        Ok(record)
    }

    async fn apply_patch(&self, id: &ContactId, patch: &Value) -> Result<Option<ContactRecord>> {
        let mut records = self.records.write();
        let Some(existing) = records.iter_mut().find(|r| r.id == *id) else {
            return Ok(None);
        };
        existing.contact = validate_update(&existing.contact, patch).map_err(Error::Validation)?;
        Ok(Some(existing.clone()))
    }

    async fn replace(&self, record: &ContactRecord) -> Result<bool> {
        let mut records = self.records.write();
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => {
                existing.contact = record.contact.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &ContactId) -> Result<bool> {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|r| r.id != *id);
        Ok(records.len() < before)
    }

    async fn delete_many(&self, ids: &[ContactId]) -> Result<u64> {
        let ids: HashSet<&ContactId> = ids.iter().collect();
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|r| !ids.contains(&r.id));
        Ok((before - records.len()) as u64)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
