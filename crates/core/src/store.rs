//! Data-access boundary. The document store itself lives outside this
//! workspace; reporting only ever sees the result of a full `list()` scan.

use crate::error::{ProDialerError, ProDialerResult};
use crate::types::{Contact, ContactRecord};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Full-scan read access to the contact collection.
pub trait ContactSource {
    fn list(&self) -> ProDialerResult<Vec<Contact>>;
}

/// Contacts exported from the document store as a JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileContacts {
    path: PathBuf,
}

impl JsonFileContacts {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContactSource for JsonFileContacts {
    fn list(&self) -> ProDialerResult<Vec<Contact>> {
        let raw = std::fs::read_to_string(&self.path)?;
        let contacts = parse_contacts(&raw)?;
        debug!(path = %self.path.display(), count = contacts.len(), "Loaded contacts");
        Ok(contacts)
    }
}

/// Parses a JSON array of contact documents. A document that does not fit
/// the record shape is skipped; only a non-array payload is an error.
pub fn parse_contacts(raw: &str) -> ProDialerResult<Vec<Contact>> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let serde_json::Value::Array(documents) = value else {
        return Err(ProDialerError::InvalidRecord(
            "expected a JSON array of contacts".into(),
        ));
    };

    let mut contacts = Vec::with_capacity(documents.len());
    for (index, document) in documents.into_iter().enumerate() {
        match serde_json::from_value::<ContactRecord>(document) {
            Ok(record) => contacts.push(Contact::from(record)),
            Err(e) => warn!(index, error = %e, "Skipping malformed contact document"),
        }
    }
    Ok(contacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_skips_malformed_documents() {
        let raw = r#"[
            {"id": "a", "name": "Good", "phone": "1", "status": "Interested"},
            {"id": "b", "name": 42},
            {"id": "c", "name": "Also good", "phone": "2", "callHistory": []}
        ]"#;
        let contacts = parse_contacts(raw).unwrap();
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].id, "a");
        assert_eq!(contacts[1].id, "c");
    }

    #[test]
    fn test_bad_call_entry_keeps_contact() {
        let raw = r#"[
            {"id": "a", "name": "Fraction", "phone": "1", "callHistory": [
                {"time": "2026-10-14T10:00:00Z", "durationSeconds": 45.5, "outcome": "Answered"},
                {"time": "2026-10-14T11:00:00Z", "durationSeconds": "12", "outcome": "Busy"},
                {"time": "yesterday", "durationSeconds": 60, "outcome": "Answered"},
                {"time": "2026-10-14T12:00:00Z", "durationSeconds": false, "outcome": 7},
                {"time": "2026-10-14T13:00:00Z", "durationSeconds": [], "outcome": "Answered"}
            ]},
            {"id": "b", "name": "Plain", "phone": "2", "callHistory": [
                {"time": "2026-10-15T10:00:00Z", "durationSeconds": 40, "outcome": "Answered"}
            ]}
        ]"#;
        let contacts = parse_contacts(raw).unwrap();
        assert_eq!(contacts.len(), 2);

        let durations: Vec<u64> = contacts[0]
            .call_history
            .iter()
            .map(|c| c.duration_seconds)
            .collect();
        // The unparseable time and the non-string outcome drop their entries.
        assert_eq!(durations, vec![46, 12, 0]);
        assert_eq!(contacts[1].call_history[0].duration_seconds, 40);
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_contacts(r#"{"id": "a"}"#).unwrap_err();
        assert!(matches!(err, ProDialerError::InvalidRecord(_)));
        assert!(matches!(
            parse_contacts("not json").unwrap_err(),
            ProDialerError::Serialization(_)
        ));
    }

    #[test]
    fn test_json_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "x", "name": "Meera", "phone": "99", "tags": ["Hot"], "status": "Call Again"}}]"#
        )
        .unwrap();

        let source = JsonFileContacts::new(file.path());
        let contacts = source.list().unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name, "Meera");

        let missing = JsonFileContacts::new("/nonexistent/contacts.json");
        assert!(matches!(missing.list().unwrap_err(), ProDialerError::Io(_)));
    }
}
