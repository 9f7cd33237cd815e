//! Contact request record types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::Error;

/// Opaque, system-generated record identifier.
///
/// Serialized as a plain string. Assigned once at creation and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(Uuid);

impl ContactId {
    /// Generates a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Parses every id in a list, failing on the first malformed one.
    pub fn parse_all<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Self>, Error> {
        raw.iter().map(|s| s.as_ref().parse()).collect()
    }
}

impl FromStr for ContactId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| Error::invalid_id(s))
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The person behind a contact request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requester {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

/// A validated contact request body (everything but the id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactUs {
    pub talk_about: String,
    pub time_frame: String,
    pub project_type: String,
    pub budget: String,
    pub description: String,
    pub requester: Requester,
}

impl ContactUs {
    /// Free-text fields considered by `?text=` search.
    pub fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.talk_about.as_str()),
            Some(self.time_frame.as_str()),
            Some(self.project_type.as_str()),
            Some(self.budget.as_str()),
            Some(self.description.as_str()),
            Some(self.requester.name.as_str()),
            self.requester.company_name.as_deref(),
            Some(self.requester.email.as_str()),
        ]
        .into_iter()
        .flatten()
    }
}

/// A persisted contact request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    #[serde(rename = "_id")]
    pub id: ContactId,
    #[serde(flatten)]
    pub contact: ContactUs,
}

impl ContactRecord {
    pub fn new(id: ContactId, contact: ContactUs) -> Self {
        Self { id, contact }
    }

    /// The stored document without its id, as raw JSON.
    pub fn document(&self) -> Result<serde_json::Value, Error> {
        Ok(serde_json::to_value(&self.contact)?)
    }
}
