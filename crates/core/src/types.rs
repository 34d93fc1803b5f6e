//! Contact and call-event model, plus the loose wire records they are
//! normalized from at the data-access boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::warn;

/// Qualification status of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadStatus {
    #[serde(rename = "Interested")]
    Interested,
    #[serde(rename = "Not Interested")]
    NotInterested,
    #[serde(rename = "Call Again")]
    CallAgain,
    /// Stored status was blank or outside the known vocabulary.
    #[serde(rename = "Unassigned")]
    Unassigned,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 3] = [Self::Interested, Self::NotInterested, Self::CallAgain];

    pub fn label(self) -> &'static str {
        match self {
            Self::Interested => "Interested",
            Self::NotInterested => "Not Interested",
            Self::CallAgain => "Call Again",
            Self::Unassigned => "Unassigned",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label.trim())
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Audience label attached to a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadTag {
    Hot,
    Cold,
    #[serde(rename = "Follow-up")]
    FollowUp,
}

impl LeadTag {
    pub const ALL: [LeadTag; 3] = [Self::Hot, Self::Cold, Self::FollowUp];

    pub fn label(self) -> &'static str {
        match self {
            Self::Hot => "Hot",
            Self::Cold => "Cold",
            Self::FollowUp => "Follow-up",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label.trim())
    }
}

impl fmt::Display for LeadTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One logged phone interaction against a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallEvent {
    pub time: DateTime<Utc>,
    pub duration_seconds: u64,
    /// Open vocabulary: "Answered", "No Answer", "Busy", "Voicemail", ...
    pub outcome: String,
}

/// A lead record as consumed by reporting. Read-only from the engine's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    /// Insertion-ordered, no duplicates.
    pub tags: Vec<LeadTag>,
    pub status: LeadStatus,
    /// Insertion order is call order, not necessarily chronological.
    pub call_history: Vec<CallEvent>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

// ─── Wire records ───────────────────────────────────────────────────────────

/// Call entry as stored by the document store. Every field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_duration")]
    pub duration_seconds: Option<i64>,
    #[serde(default)]
    pub outcome: Option<String>,
}

/// Accepts integer, fractional or numeric-string durations, rounded to whole
/// seconds. Any other value reads as 0.
fn lenient_duration<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(|value| duration_from_value(&value)))
}

fn duration_from_value(value: &Value) -> i64 {
    let seconds = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().map(round_seconds)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(round_seconds),
        _ => None,
    };
    seconds
        .unwrap_or_else(|| {
            warn!(value = %value, "Unreadable call duration, using 0");
            0
        })
        .max(0)
}

// `as` saturates at the i64 bounds.
fn round_seconds(seconds: f64) -> i64 {
    seconds.round() as i64
}

/// Contact document as stored by the document store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub status: Option<String>,
    /// Kept raw so one unreadable entry drops only that call.
    #[serde(default)]
    pub call_history: Option<Vec<Value>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ContactRecord> for Contact {
    /// Normalizes a stored document. Never fails: missing collections become
    /// empty, missing durations become 0, unknown tags and call entries
    /// without a timestamp are dropped.
    fn from(record: ContactRecord) -> Self {
        let mut tags = Vec::new();
        for label in record.tags.unwrap_or_default() {
            match LeadTag::parse(&label) {
                Some(tag) if !tags.contains(&tag) => tags.push(tag),
                Some(_) => {}
                None => warn!(contact_id = %record.id, tag = %label, "Dropping unknown tag"),
            }
        }

        let status = match record.status.as_deref() {
            Some(label) => LeadStatus::parse(label).unwrap_or_else(|| {
                if !label.trim().is_empty() {
                    warn!(contact_id = %record.id, status = %label, "Unknown lead status");
                }
                LeadStatus::Unassigned
            }),
            None => LeadStatus::Unassigned,
        };

        let call_history = record
            .call_history
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let call = match serde_json::from_value::<CallRecord>(entry) {
                    Ok(call) => call,
                    Err(e) => {
                        warn!(contact_id = %record.id, index, error = %e, "Dropping malformed call entry");
                        return None;
                    }
                };
                let Some(time) = call.time else {
                    warn!(contact_id = %record.id, index, "Dropping call entry without time");
                    return None;
                };
                Some(CallEvent {
                    time,
                    duration_seconds: call.duration_seconds.unwrap_or(0).max(0) as u64,
                    outcome: call.outcome.unwrap_or_default(),
                })
            })
            .collect();

        Self {
            id: record.id,
            name: record.name.unwrap_or_default(),
            phone: record.phone.unwrap_or_default(),
            email: record.email.filter(|e| !e.is_empty()),
            tags,
            status,
            call_history,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
