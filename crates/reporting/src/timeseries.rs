//! Fixed 7-slot daily call series shared by the dashboard and report charts.
//!
//! Bins cover today and the six preceding calendar days in the reporting
//! calendar. An event lands in a bin by calendar-date equality, so the chart
//! ignores the report's own window: a 90-day report still charts 7 days.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use prodialer_core::Contact;
use serde::{Deserialize, Serialize};

use crate::classifier::is_successful;

pub const CHART_DAYS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// Short date label, e.g. "Oct 16".
    pub label: String,
    pub date: NaiveDate,
    pub total_calls: u64,
    pub successful_calls: u64,
}

/// Returns exactly [`CHART_DAYS`] points, oldest first, zero-seeded.
///
/// Each instant is mapped through `calendar` on its own, so a zone with
/// daylight saving puts events on either side of a transition on the
/// correct local day.
pub fn bin_daily<Tz: TimeZone>(contacts: &[Contact], now: DateTime<Utc>, calendar: &Tz) -> Vec<ChartPoint> {
    let today = now.with_timezone(calendar).date_naive();
    let first = today - Duration::days(CHART_DAYS as i64 - 1);

    let mut points: Vec<ChartPoint> = (0..CHART_DAYS as i64)
        .map(|offset| {
            let date = first + Duration::days(offset);
            ChartPoint {
                label: short_label(date),
                date,
                total_calls: 0,
                successful_calls: 0,
            }
        })
        .collect();

    for event in contacts.iter().flat_map(|c| c.call_history.iter()) {
        let day = event.time.with_timezone(calendar).date_naive();
        let Some(point) = points.iter_mut().find(|p| p.date == day) else {
            continue;
        };
        point.total_calls += 1;
        if is_successful(event) {
            point.successful_calls += 1;
        }
    }

    points
}

pub fn short_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}
