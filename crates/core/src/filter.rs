//! List/search filter.

use crate::contact::{ContactId, ContactRecord};

/// Filter for the list operation. Conditions combine with AND; an empty
/// filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    /// Exact id match.
    pub id: Option<ContactId>,
    /// Case-insensitive literal substring over the searchable fields.
    pub text: Option<String>,
}

impl ContactFilter {
    /// Builds a filter from raw query values. Blank values are ignored;
    /// a non-blank malformed id is an error.
    pub fn from_query(id: Option<&str>, text: Option<&str>) -> crate::Result<Self> {
        let id = match id.filter(|s| !s.trim().is_empty()) {
            Some(raw) => Some(raw.parse()?),
            None => None,
        };
        let text = text
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.to_string());
        Ok(Self { id, text })
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.text.is_none()
    }

    /// In-process evaluation, used by stores without a query language.
    pub fn matches(&self, record: &ContactRecord) -> bool {
        if let Some(id) = self.id {
            if record.id != id {
                return false;
            }
        }
        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            return record
                .contact
                .searchable_fields()
                .any(|field| field.to_lowercase().contains(&needle));
        }
        true
    }
}
