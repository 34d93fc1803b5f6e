//! Call analytics for the ProDialer admin dashboard — windowed report
//! aggregation, the 7-day call chart, dashboard cards, lead filtering and
//! CSV/PDF/JSON export.

pub mod classifier;
pub mod dashboard;
pub mod engine;
pub mod export;
pub mod leads;
pub mod timeseries;
pub mod window;

#[cfg(test)]
mod testing;

pub use classifier::is_successful;
pub use dashboard::DashboardSummary;
pub use engine::{ActivityEntry, CallAnalytics, ReportSnapshot};
pub use leads::LeadQuery;
pub use timeseries::ChartPoint;
pub use window::{resolve, DateRange, ReportWindow};
