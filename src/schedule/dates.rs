use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Number of upcoming meetups kept on the calendar
pub const SLOTS_AHEAD: usize = 4;

/// Meetups happen on this weekday
pub const MEETUP_WEEKDAY: Weekday = Weekday::Tue;

fn next_day(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX)
}

fn previous_day(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(1)).unwrap_or(NaiveDate::MIN)
}

/// First Tuesday strictly after `date`
pub fn next_tuesday(date: NaiveDate) -> NaiveDate {
    let mut target = next_day(date);
    while target.weekday() != MEETUP_WEEKDAY {
        target = next_day(target);
    }
    target
}

/// Most recent Tuesday on or before `today`
pub fn anchor_tuesday(today: NaiveDate) -> NaiveDate {
    let mut target = today;
    while target.weekday() != MEETUP_WEEKDAY {
        target = previous_day(target);
    }
    target
}

/// The four Tuesdays following the anchor, ascending
pub fn target_dates(today: NaiveDate) -> [NaiveDate; SLOTS_AHEAD] {
    let mut last = anchor_tuesday(today);
    let mut dates = [last; SLOTS_AHEAD];
    for slot in dates.iter_mut() {
        last = next_tuesday(last);
        *slot = last;
    }
    dates
}

/// Long date format used on pages, e.g. `07.10.2025`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Short date format used on the poster, e.g. `07.10.`
pub fn format_date_short(date: NaiveDate) -> String {
    date.format("%d.%m.").to_string()
}

/// Parses the long date format
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%d.%m.%Y").ok()
}
