//! Time window resolution: maps a range selector to an absolute cutoff.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Trailing span over which report totals are computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateRange {
    #[default]
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "90d")]
    Last90Days,
}

impl DateRange {
    pub fn code(self) -> &'static str {
        match self {
            Self::Last7Days => "7d",
            Self::Last30Days => "30d",
            Self::Last90Days => "90d",
        }
    }

    pub fn days(self) -> i64 {
        match self {
            Self::Last7Days => 7,
            Self::Last30Days => 30,
            Self::Last90Days => 90,
        }
    }

    /// Strict parse for callers that validate input themselves.
    pub fn try_from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "7d" => Some(Self::Last7Days),
            "30d" => Some(Self::Last30Days),
            "90d" => Some(Self::Last90Days),
            _ => None,
        }
    }

    /// Lenient parse: any unrecognized code resolves to the 7-day window.
    pub fn from_code(code: &str) -> Self {
        Self::try_from_code(code).unwrap_or_else(|| {
            debug!(code, "Unrecognized range code, using 7d");
            Self::default()
        })
    }
}

/// `windowStart = now - N days` for the given range code.
pub fn resolve(range_code: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    ReportWindow::new(DateRange::from_code(range_code), now).start
}

/// A resolved report window. Built once per report from a single `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    pub range: DateRange,
    pub now: DateTime<Utc>,
    pub start: DateTime<Utc>,
}

impl ReportWindow {
    pub fn new(range: DateRange, now: DateTime<Utc>) -> Self {
        Self {
            range,
            now,
            start: now - Duration::days(range.days()),
        }
    }

    /// Inclusive lower bound, no upper bound.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start
    }
}
