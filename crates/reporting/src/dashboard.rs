//! Dashboard summary cards — roster-wide call totals plus the 7-day chart.

use chrono::{DateTime, Duration, TimeZone, Utc};
use prodialer_core::Contact;
use serde::{Deserialize, Serialize};

use crate::classifier::{is_successful, success_rate};
use crate::engine::CallAnalytics;
use crate::timeseries::{bin_daily, ChartPoint};

/// Span of the "recent calls" card.
pub const RECENT_CALLS_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_leads: u64,
    /// Every logged call, regardless of age.
    pub total_calls: u64,
    pub success_rate: u32,
    /// Calls strictly newer than `now - 7 days`.
    pub recent_calls: u64,
    pub chart_data: Vec<ChartPoint>,
    pub generated_at: DateTime<Utc>,
}

impl<Tz: TimeZone> CallAnalytics<Tz> {
    pub fn dashboard_summary(&self, contacts: &[Contact], now: DateTime<Utc>) -> DashboardSummary {
        let recent_cutoff = now - Duration::days(RECENT_CALLS_DAYS);
        let mut total_calls = 0u64;
        let mut successful_calls = 0u64;
        let mut recent_calls = 0u64;

        for event in contacts.iter().flat_map(|c| c.call_history.iter()) {
            total_calls += 1;
            if is_successful(event) {
                successful_calls += 1;
            }
            if event.time > recent_cutoff {
                recent_calls += 1;
            }
        }

        DashboardSummary {
            total_leads: contacts.len() as u64,
            total_calls,
            success_rate: success_rate(successful_calls, total_calls),
            recent_calls,
            chart_data: bin_daily(contacts, now, self.calendar()),
            generated_at: now,
        }
    }
}
