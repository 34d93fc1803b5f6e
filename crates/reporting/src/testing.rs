//! US Eastern time under its 2026 daylight-saving rules. Lets calendar tests
//! cross a transition without depending on the host's zone database.

use chrono::{Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, TimeZone};

#[derive(Debug, Clone, Copy)]
pub(crate) struct Eastern2026;

const EST: i32 = -5 * 3600;
const EDT: i32 = -4 * 3600;

fn offset(seconds: i32) -> FixedOffset {
    FixedOffset::east_opt(seconds).unwrap()
}

fn utc_at(month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

impl TimeZone for Eastern2026 {
    type Offset = FixedOffset;

    fn from_offset(_: &FixedOffset) -> Self {
        Eastern2026
    }

    fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
        self.offset_from_local_datetime(&local.and_hms_opt(12, 0, 0).unwrap())
    }

    fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
        let valid: Vec<FixedOffset> = [EST, EDT]
            .into_iter()
            .map(offset)
            .filter(|o| {
                let utc = *local - Duration::seconds(i64::from(o.local_minus_utc()));
                self.offset_from_utc_datetime(&utc) == *o
            })
            .collect();
        match valid.as_slice() {
            [single] => LocalResult::Single(*single),
            [first, second] => LocalResult::Ambiguous(*first, *second),
            _ => LocalResult::None,
        }
    }

    fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
        self.offset_from_utc_datetime(&utc.and_hms_opt(0, 0, 0).unwrap())
    }

    fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
        // 02:00 local on Mar 8 and Nov 1.
        if *utc >= utc_at(3, 8, 7) && *utc < utc_at(11, 1, 6) {
            offset(EDT)
        } else {
            offset(EST)
        }
    }
}
