//! Call success rule. The dashboard and every report go through
//! [`is_successful`]; nothing else may decide what a successful call is.

use prodialer_core::CallEvent;

pub const ANSWERED_OUTCOME: &str = "Answered";

/// A call must last strictly longer than this to count as successful.
pub const MIN_SUCCESS_DURATION_SECS: u64 = 30;

pub fn is_successful(event: &CallEvent) -> bool {
    event.outcome == ANSWERED_OUTCOME && event.duration_seconds > MIN_SUCCESS_DURATION_SECS
}

/// `round(successful / total * 100)`, 0 when there are no calls.
pub fn success_rate(successful: u64, total: u64) -> u32 {
    let percent = rounded_ratio(u128::from(successful) * 100, total);
    u32::try_from(percent).unwrap_or(u32::MAX)
}

/// Half-up rounded integer division; 0 for a zero denominator. Computed in
/// `u128` so sums of `u64` durations cannot overflow; saturates at `u64::MAX`.
pub(crate) fn rounded_ratio(numerator: u128, denominator: u64) -> u64 {
    if denominator == 0 {
        return 0;
    }
    let denominator = u128::from(denominator);
    let quotient = numerator / denominator + u128::from(numerator % denominator * 2 >= denominator);
    u64::try_from(quotient).unwrap_or(u64::MAX)
}
