use std::collections::{BTreeSet, VecDeque};

use chrono::NaiveDate;
use tracing::info;

use super::dates::target_dates;
use super::types::{Snapshot, WeeklyOutcome, WeeklyReport};

/// Runs the weekly rotation over `snapshot` as of `today`.
///
/// Current appointments dated strictly before `today` move to the archive
/// with their provenance stripped. The four Tuesdays after the anchor that
/// have no current appointment are then filled, earliest date first, from
/// the front of the waiting list. Slots stay open once the list runs dry.
pub fn run_weekly_pass(snapshot: &Snapshot, today: NaiveDate) -> WeeklyOutcome {
    let mut next = snapshot.clone().normalized();
    let mut report = WeeklyReport::default();

    let (past, remaining): (Vec<_>, Vec<_>) = next
        .current
        .drain(..)
        .partition(|a| a.scheduled_date.is_some_and(|d| d < today));
    next.current = remaining;

    for appointment in past {
        let archived = appointment.anonymized();
        info!(id = %archived.id, name = %archived.name, "pub archived");
        next.archive.push(archived.clone());
        report.archived.push(archived);
    }

    let covered: BTreeSet<NaiveDate> = next.current.iter().filter_map(|a| a.scheduled_date).collect();
    let open_slots: Vec<NaiveDate> = target_dates(today)
        .into_iter()
        .filter(|d| !covered.contains(d))
        .collect();

    let mut queue: VecDeque<_> = next.waiting.drain(..).collect();
    for date in open_slots {
        let Some(mut appointment) = queue.pop_front() else {
            break;
        };
        info!(date = %date, id = %appointment.id, "scheduling");
        appointment.scheduled_date = Some(date);
        report.scheduled.push((appointment.id.clone(), date));
        next.current.push(appointment);
    }
    next.waiting = queue.into_iter().collect();
    report.still_waiting = next.waiting.clone();

    info!(
        archived = report.archived.len(),
        scheduled = report.scheduled.len(),
        waiting = report.still_waiting.len(),
        "weekly pass finished"
    );

    WeeklyOutcome { snapshot: next, report }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::{Appointment, Comment};
    use chrono::{Days, NaiveDateTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entered() -> NaiveDateTime {
        date(2025, 9, 1).and_hms_opt(12, 0, 0).unwrap()
    }

    fn waiting_pub(name: &str, sort_order: i64) -> Appointment {
        let mut a = Appointment::new(name, "Street", "Hamburg", "U1", entered(), Some("src$1".into()));
        a.sort_order = sort_order;
        a
    }

    fn fixed_pub(name: &str, on: NaiveDate) -> Appointment {
        let mut a = waiting_pub(name, 0);
        a.scheduled_date = Some(on);
        a
    }

    fn five_waiting() -> Snapshot {
        Snapshot {
            waiting: (1..=5).map(|i| waiting_pub(&format!("Pub {i}"), i)).collect(),
            ..Default::default()
        }
    }

    // Wednesday
    fn today() -> NaiveDate {
        date(2025, 10, 8)
    }

    #[test]
    fn test_fills_four_tuesdays_in_queue_order() {
        let snapshot = five_waiting();
        let outcome = run_weekly_pass(&snapshot, today());

        let targets = target_dates(today());
        assert_eq!(outcome.report.scheduled.len(), 4);
        for (i, (id, on)) in outcome.report.scheduled.iter().enumerate() {
            assert_eq!(id, &snapshot.waiting[i].id);
            assert_eq!(*on, targets[i]);
        }
        assert_eq!(outcome.snapshot.current.len(), 4);
        assert_eq!(outcome.snapshot.waiting.len(), 1);
        assert_eq!(outcome.snapshot.waiting[0].name, "Pub 5");
        assert_eq!(outcome.report.still_waiting, outcome.snapshot.waiting);
    }

    #[test]
    fn test_skips_covered_tuesday() {
        let mut snapshot = five_waiting();
        let second = target_dates(today())[1];
        snapshot.current.push(fixed_pub("Fixed", second));

        let outcome = run_weekly_pass(&snapshot, today());

        assert_eq!(outcome.report.scheduled.len(), 3);
        assert!(outcome.report.scheduled.iter().all(|(_, d)| *d != second));
        assert_eq!(outcome.snapshot.waiting.len(), 2);
        assert_eq!(outcome.snapshot.current.len(), 4);
    }

    #[test]
    fn test_archives_yesterday_and_strips_provenance() {
        let yesterday = today().checked_sub_days(Days::new(1)).unwrap();
        let mut old = fixed_pub("Old", yesterday);
        old.comments.push(Comment {
            author: "anna".into(),
            text: "nice".into(),
            source: Some("2025-10-01T10:00:00$7".into()),
        });
        let old_id = old.id.clone();
        let snapshot = Snapshot { current: vec![old], ..Default::default() };

        let outcome = run_weekly_pass(&snapshot, today());

        assert_eq!(outcome.report.archived.len(), 1);
        assert!(outcome.snapshot.current.iter().all(|a| a.id != old_id));
        let archived = &outcome.snapshot.archive[0];
        assert_eq!(archived.id, old_id);
        assert_eq!(archived.source, None);
        assert!(archived.comments.iter().all(|c| c.source.is_none()));
        assert_eq!(archived.comments[0].text, "nice");
    }

    #[test]
    fn test_today_is_not_past() {
        let snapshot = Snapshot { current: vec![fixed_pub("Tonight", today())], ..Default::default() };
        let outcome = run_weekly_pass(&snapshot, today());
        assert!(outcome.report.archived.is_empty());
        assert_eq!(outcome.snapshot.current.len(), 1);
    }

    #[test]
    fn test_empty_waiting_list_leaves_slots_open() {
        let outcome = run_weekly_pass(&Snapshot::default(), today());
        assert!(outcome.report.is_empty());
        assert!(outcome.snapshot.current.is_empty());
    }

    #[test]
    fn test_second_pass_is_idempotent() {
        let mut snapshot = five_waiting();
        snapshot.current.push(fixed_pub("Old", date(2025, 9, 30)));

        let first = run_weekly_pass(&snapshot, today());
        let second = run_weekly_pass(&first.snapshot, today());

        assert!(second.report.is_empty());
        assert_eq!(second.snapshot, first.snapshot);
    }

    #[test]
    fn test_no_duplicate_dates_across_weeks() {
        let mut snapshot = Snapshot {
            waiting: (1..=20).map(|i| waiting_pub(&format!("Pub {i}"), i)).collect(),
            ..Default::default()
        };
        let mut day = date(2025, 10, 1);
        for _ in 0..30 {
            snapshot = run_weekly_pass(&snapshot, day).snapshot;
            let mut dates: Vec<_> = snapshot.current.iter().filter_map(|a| a.scheduled_date).collect();
            let before = dates.len();
            dates.sort();
            dates.dedup();
            assert_eq!(dates.len(), before);
            day = day.checked_add_days(Days::new(3)).unwrap();
        }
    }

    #[test]
    fn test_unsorted_waiting_input_is_served_by_rank() {
        let snapshot = Snapshot {
            waiting: vec![waiting_pub("Third", 3), waiting_pub("First", 1), waiting_pub("Second", 2)],
            ..Default::default()
        };
        let outcome = run_weekly_pass(&snapshot, today());
        let names: Vec<_> = outcome.snapshot.upcoming().iter().map(|a| a.name.clone()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }
}
