//! Lead table filtering: free-text search plus an optional status filter.

use prodialer_core::{Contact, LeadStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeadQuery {
    #[serde(default)]
    pub search: String,
    /// `None` means all statuses.
    #[serde(default)]
    pub status: Option<LeadStatus>,
}

impl LeadQuery {
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: LeadStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Name and email match case-insensitively, phone matches verbatim.
    pub fn matches(&self, contact: &Contact) -> bool {
        let needle = self.search.to_lowercase();
        let text_match = contact.name.to_lowercase().contains(&needle)
            || contact.phone.contains(&self.search)
            || contact
                .email
                .as_deref()
                .is_some_and(|e| e.to_lowercase().contains(&needle));

        text_match && self.status.is_none_or(|s| s == contact.status)
    }

    pub fn filter<'a>(&self, contacts: &'a [Contact]) -> Vec<&'a Contact> {
        contacts.iter().filter(|c| self.matches(c)).collect()
    }
}
