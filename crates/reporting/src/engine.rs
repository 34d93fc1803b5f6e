//! Call analytics aggregation: folds every contact's call history inside a
//! report window into an immutable [`ReportSnapshot`].

use chrono::{DateTime, TimeZone, Utc};
use indexmap::IndexMap;
use prodialer_core::{Contact, LeadStatus};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::{is_successful, rounded_ratio, success_rate};
use crate::timeseries::{bin_daily, ChartPoint};
use crate::window::{DateRange, ReportWindow};

/// Length of the recent-activity feed.
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

/// One in-window call with a copy of its contact's identity and status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub name: String,
    pub phone: String,
    pub outcome: String,
    #[serde(rename = "duration")]
    pub duration_seconds: u64,
    pub date: DateTime<Utc>,
    pub status: LeadStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSnapshot {
    pub range: DateRange,
    pub window_start: DateTime<Utc>,
    pub generated_at: DateTime<Utc>,
    /// Roster size, never windowed.
    pub total_leads: u64,
    pub total_calls: u64,
    pub successful_calls: u64,
    /// Percent, 0..=100.
    pub success_rate: u32,
    /// Seconds.
    pub average_call_duration: u64,
    /// Keyed by the contact's current status label, in first-seen order.
    pub calls_by_status: IndexMap<String, u64>,
    /// A call is counted once for every tag on its contact.
    pub calls_by_tag: IndexMap<String, u64>,
    pub recent_activity: Vec<ActivityEntry>,
    pub chart_data: Vec<ChartPoint>,
}

/// Report computation over an in-memory contact collection. `Tz` is the
/// calendar used for day bins.
///
/// Status and tag attribution use each contact's state at read time, not at
/// call time; contacts do not carry per-call history of either.
#[derive(Debug, Clone)]
pub struct CallAnalytics<Tz: TimeZone = Utc> {
    calendar: Tz,
}

impl<Tz: TimeZone> CallAnalytics<Tz> {
    pub fn new(calendar: Tz) -> Self {
        Self { calendar }
    }

    pub fn calendar(&self) -> &Tz {
        &self.calendar
    }

    pub fn aggregate(&self, contacts: &[Contact], window: &ReportWindow) -> ReportSnapshot {
        let mut total_calls = 0u64;
        let mut successful_calls = 0u64;
        let mut duration_sum = 0u128;
        let mut calls_by_status: IndexMap<String, u64> = IndexMap::new();
        let mut calls_by_tag: IndexMap<String, u64> = IndexMap::new();
        let mut activity = Vec::new();

        for contact in contacts {
            for event in contact.call_history.iter().filter(|e| window.contains(e.time)) {
                total_calls += 1;
                duration_sum += u128::from(event.duration_seconds);

                *calls_by_status
                    .entry(contact.status.label().to_string())
                    .or_insert(0) += 1;
                for tag in &contact.tags {
                    *calls_by_tag.entry(tag.label().to_string()).or_insert(0) += 1;
                }

                if is_successful(event) {
                    successful_calls += 1;
                }

                activity.push(ActivityEntry {
                    name: contact.name.clone(),
                    phone: contact.phone.clone(),
                    outcome: event.outcome.clone(),
                    duration_seconds: event.duration_seconds,
                    date: event.time,
                    status: contact.status,
                });
            }
        }

        // Stable sort: equal timestamps keep contact traversal order.
        activity.sort_by(|a, b| b.date.cmp(&a.date));
        activity.truncate(RECENT_ACTIVITY_LIMIT);

        debug!(
            range = window.range.code(),
            contacts = contacts.len(),
            total_calls,
            successful_calls,
            "Report aggregated"
        );

        ReportSnapshot {
            range: window.range,
            window_start: window.start,
            generated_at: window.now,
            total_leads: contacts.len() as u64,
            total_calls,
            successful_calls,
            success_rate: success_rate(successful_calls, total_calls),
            average_call_duration: rounded_ratio(duration_sum, total_calls),
            calls_by_status,
            calls_by_tag,
            recent_activity: activity,
            chart_data: bin_daily(contacts, window.now, &self.calendar),
        }
    }
}

impl Default for CallAnalytics<Utc> {
    fn default() -> Self {
        Self::new(Utc)
    }
}
