//! Lead table CSV export. Column order is fixed; downstream consumers read
//! by position.

use chrono::{DateTime, TimeZone, Utc};
use prodialer_core::Contact;
use std::io::Write;

use super::ExportResult;

pub const CSV_HEADER: [&str; 8] = [
    "Name",
    "Phone",
    "Email",
    "Tags",
    "Status",
    "TotalCalls",
    "CreatedAt",
    "UpdatedAt",
];

/// Short date in the reporting calendar, e.g. "10/16/2026".
pub fn short_date<Tz: TimeZone>(instant: DateTime<Utc>, calendar: &Tz) -> String {
    instant
        .with_timezone(calendar)
        .date_naive()
        .format("%-m/%-d/%Y")
        .to_string()
}

fn row<Tz: TimeZone>(contact: &Contact, calendar: &Tz) -> [String; 8] {
    let date = |d: Option<DateTime<Utc>>| d.map(|d| short_date(d, calendar)).unwrap_or_default();
    [
        contact.name.clone(),
        contact.phone.clone(),
        contact.email.clone().unwrap_or_default(),
        contact
            .tags
            .iter()
            .map(|t| t.label())
            .collect::<Vec<_>>()
            .join(", "),
        contact.status.label().to_string(),
        contact.call_history.len().to_string(),
        date(contact.created_at),
        date(contact.updated_at),
    ]
}

/// One row per contact after the header. Call counts are unwindowed.
pub fn write_csv<W: Write, Tz: TimeZone>(contacts: &[Contact], calendar: &Tz, writer: W) -> ExportResult<()> {
    let mut out = ::csv::Writer::from_writer(writer);
    out.write_record(CSV_HEADER)?;
    for contact in contacts {
        out.write_record(row(contact, calendar))?;
    }
    out.flush()?;
    Ok(())
}

pub fn to_csv<Tz: TimeZone>(contacts: &[Contact], calendar: &Tz) -> ExportResult<String> {
    let mut buf = Vec::new();
    write_csv(contacts, calendar, &mut buf)?;
    // Every field written above is a Rust `String`, so the output is UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ExportError;
    use crate::testing::Eastern2026;
    use chrono::FixedOffset;
    use pretty_assertions::assert_eq;
    use prodialer_core::{CallEvent, LeadStatus, LeadTag};

    fn utc() -> &'static Utc {
        &Utc
    }

    fn sample() -> Vec<Contact> {
        let created = Utc.with_ymd_and_hms(2026, 3, 5, 10, 0, 0).unwrap();
        vec![
            Contact {
                id: "1".into(),
                name: "Shah, Priya".into(),
                phone: "+91 98200 11111".into(),
                email: Some("priya@example.com".into()),
                tags: vec![LeadTag::Hot, LeadTag::FollowUp],
                status: LeadStatus::Interested,
                call_history: vec![
                    CallEvent {
                        time: created,
                        duration_seconds: 12,
                        outcome: "Busy".into(),
                    };
                    3
                ],
                created_at: Some(created),
                updated_at: Some(Utc.with_ymd_and_hms(2026, 10, 16, 23, 30, 0).unwrap()),
            },
            Contact {
                id: "2".into(),
                name: "Tom \"TJ\" Reed\nJr".into(),
                phone: "555".into(),
                email: None,
                tags: vec![],
                status: LeadStatus::CallAgain,
                call_history: vec![],
                created_at: None,
                updated_at: None,
            },
        ]
    }

    #[test]
    fn test_csv_header_and_rows() {
        let csv = to_csv(&sample(), utc()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Name,Phone,Email,Tags,Status,TotalCalls,CreatedAt,UpdatedAt"
        );
        assert_eq!(
            lines.next().unwrap(),
            "\"Shah, Priya\",+91 98200 11111,priya@example.com,\"Hot, Follow-up\",Interested,3,3/5/2026,10/16/2026"
        );
    }

    #[test]
    fn test_csv_round_trip_by_position() {
        let contacts = sample();
        let csv = to_csv(&contacts, utc()).unwrap();

        let mut reader = ::csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(csv.as_bytes());
        let rows: Vec<::csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        assert_eq!(rows.len(), contacts.len());
        for (row, contact) in rows.iter().zip(&contacts) {
            assert_eq!(&row[0], contact.name.as_str());
        }
        assert_eq!(&rows[1][2], "");
        assert_eq!(&rows[1][3], "");
        assert_eq!(&rows[1][5], "0");
        assert_eq!(&rows[1][6], "");
    }

    #[test]
    fn test_dates_follow_calendar() {
        let ist = FixedOffset::east_opt(330 * 60).unwrap();
        let csv = to_csv(&sample()[..1], &ist).unwrap();
        // 23:30 UTC on Oct 16 is Oct 17 in UTC+05:30.
        assert!(csv.contains(",10/17/2026"));
    }

    #[test]
    fn test_dates_follow_daylight_saving() {
        // 04:30 UTC is 00:30 EDT in July but 23:30 EST in January.
        let summer = Utc.with_ymd_and_hms(2026, 7, 1, 4, 30, 0).unwrap();
        let winter = Utc.with_ymd_and_hms(2026, 1, 15, 4, 30, 0).unwrap();
        assert_eq!(short_date(summer, &Eastern2026), "7/1/2026");
        assert_eq!(short_date(winter, &Eastern2026), "1/14/2026");

        let mut contacts = sample();
        contacts[0].created_at = Some(summer);
        contacts[0].updated_at = Some(winter);
        let csv = to_csv(&contacts[..1], &Eastern2026).unwrap();
        assert!(csv.lines().nth(1).unwrap().ends_with(",7/1/2026,1/14/2026"));
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure_is_reported() {
        let err = write_csv(&sample(), utc(), FailingSink).unwrap_err();
        assert!(matches!(err, ExportError::Csv(_) | ExportError::Io(_)));
    }
}
