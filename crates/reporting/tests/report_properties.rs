//! Property checks for the aggregation engine and the CSV exporter.

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use prodialer_core::{CallEvent, Contact, LeadStatus, LeadTag};
use prodialer_reporting::export::to_csv;
use prodialer_reporting::{CallAnalytics, DateRange, ReportWindow};
use proptest::prelude::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 18, 0, 0).unwrap()
}

fn call_strategy() -> impl Strategy<Value = CallEvent> {
    (
        0i64..120 * 24 * 60,
        0u64..240,
        prop::sample::select(vec!["Answered", "No Answer", "Busy", "Voicemail"]),
    )
        .prop_map(|(minutes_ago, duration_seconds, outcome)| CallEvent {
            time: now() - Duration::minutes(minutes_ago),
            duration_seconds,
            outcome: outcome.to_string(),
        })
}

fn contact_strategy(tags: impl Strategy<Value = Vec<LeadTag>>) -> impl Strategy<Value = Contact> {
    (
        "[A-Za-z ,\"]{1,16}",
        "[0-9+ ]{3,12}",
        tags,
        prop::sample::select(LeadStatus::ALL.to_vec()),
        prop::collection::vec(call_strategy(), 0..8),
    )
        .prop_map(|(name, phone, tags, status, call_history)| Contact {
            id: format!("{name}-{phone}"),
            name,
            phone,
            email: None,
            tags,
            status,
            call_history,
            created_at: None,
            updated_at: None,
        })
}

fn any_tags() -> impl Strategy<Value = Vec<LeadTag>> {
    prop::sample::subsequence(LeadTag::ALL.to_vec(), 0..=3)
}

fn one_tag() -> impl Strategy<Value = Vec<LeadTag>> {
    prop::sample::select(LeadTag::ALL.to_vec()).prop_map(|t| vec![t])
}

fn range_strategy() -> impl Strategy<Value = DateRange> {
    prop::sample::select(vec![DateRange::Last7Days, DateRange::Last30Days, DateRange::Last90Days])
}

proptest! {
    #[test]
    fn snapshot_invariants_hold(
        contacts in prop::collection::vec(contact_strategy(any_tags()), 0..20),
        range in range_strategy(),
    ) {
        let window = ReportWindow::new(range, now());
        let snapshot = CallAnalytics::new(Utc).aggregate(&contacts, &window);

        prop_assert!(snapshot.success_rate <= 100);
        prop_assert_eq!(snapshot.total_leads, contacts.len() as u64);
        prop_assert_eq!(snapshot.calls_by_status.values().sum::<u64>(), snapshot.total_calls);
        prop_assert!(snapshot.calls_by_tag.values().sum::<u64>() <= 3 * snapshot.total_calls);

        prop_assert_eq!(snapshot.chart_data.len(), 7);
        for point in &snapshot.chart_data {
            prop_assert!(point.total_calls >= point.successful_calls);
        }
        let charted: u64 = snapshot.chart_data.iter().map(|p| p.total_calls).sum();
        prop_assert!(charted <= snapshot.total_calls);

        prop_assert!(snapshot.recent_activity.len() <= 10);
        prop_assert!(snapshot.recent_activity.windows(2).all(|w| w[0].date >= w[1].date));
        prop_assert!(snapshot.recent_activity.iter().all(|a| window.contains(a.date)));
    }

    #[test]
    fn no_successful_calls_means_zero_rate(
        durations in prop::collection::vec(0u64..=30, 1..30),
    ) {
        let calls = durations
            .into_iter()
            .enumerate()
            .map(|(i, d)| CallEvent {
                time: now() - Duration::hours(i as i64),
                duration_seconds: d,
                outcome: "Answered".into(),
            })
            .collect();
        let contacts = vec![Contact {
            id: "x".into(),
            name: "X".into(),
            phone: "1".into(),
            email: None,
            tags: vec![],
            status: LeadStatus::Interested,
            call_history: calls,
            created_at: None,
            updated_at: None,
        }];
        let snapshot = CallAnalytics::new(Utc)
            .aggregate(&contacts, &ReportWindow::new(DateRange::Last7Days, now()));
        prop_assert!(snapshot.total_calls > 0);
        prop_assert_eq!(snapshot.success_rate, 0);
    }

    #[test]
    fn single_tag_contacts_count_each_call_once(
        contacts in prop::collection::vec(contact_strategy(one_tag()), 0..20),
    ) {
        let snapshot = CallAnalytics::new(Utc)
            .aggregate(&contacts, &ReportWindow::new(DateRange::Last90Days, now()));
        prop_assert_eq!(snapshot.calls_by_tag.values().sum::<u64>(), snapshot.total_calls);
    }

    #[test]
    fn each_call_is_counted_once_per_tag(
        contacts in prop::collection::vec(contact_strategy(any_tags()), 1..20),
    ) {
        let window = ReportWindow::new(DateRange::Last90Days, now());
        let snapshot = CallAnalytics::new(Utc).aggregate(&contacts, &window);
        let expected: usize = contacts
            .iter()
            .map(|c| c.tags.len() * c.call_history.iter().filter(|e| window.contains(e.time)).count())
            .sum();
        prop_assert_eq!(snapshot.calls_by_tag.values().sum::<u64>(), expected as u64);

        if contacts.iter().all(|c| c.tags.len() >= 2) {
            prop_assert!(snapshot.calls_by_tag.values().sum::<u64>() >= snapshot.total_calls);
        }
    }

    #[test]
    fn aggregation_is_idempotent(
        contacts in prop::collection::vec(contact_strategy(any_tags()), 0..15),
        range in range_strategy(),
    ) {
        let engine = CallAnalytics::new(FixedOffset::east_opt(-5 * 3600).unwrap());
        let window = ReportWindow::new(range, now());
        prop_assert_eq!(engine.aggregate(&contacts, &window), engine.aggregate(&contacts, &window));
    }

    #[test]
    fn csv_round_trips_names_in_order(
        contacts in prop::collection::vec(contact_strategy(any_tags()), 0..20),
    ) {
        let csv = to_csv(&contacts, &Utc).unwrap();
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(csv.as_bytes());
        let names: Vec<String> = reader
            .records()
            .map(|r| r.map(|row| row[0].to_string()))
            .collect::<Result<_, _>>()
            .unwrap();
        let expected: Vec<String> = contacts.iter().map(|c| c.name.clone()).collect();
        prop_assert_eq!(names, expected);
    }
}
