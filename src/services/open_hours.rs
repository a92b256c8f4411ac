//! Date arithmetic for laying places out over a trip.
//!
//! Places publish `weekday_text` as seven strings starting on Monday, e.g.
//! `"Monday: 9:00 AM – 5:00 PM"`. A trip is walked day by day from its start
//! date, so the weekday index advances by one per day and wraps from Sunday
//! (6) back to Monday (0).

use chrono::{Datelike, NaiveDate};

use crate::models::place::OpeningHours;

const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayHours {
    Open(String),
    Closed,
    /// The place publishes no usable weekly schedule.
    Unknown,
}

/// Every date from `start` to `end`, both inclusive.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|date| *date <= end).collect()
}

/// Index into a Monday-first `weekday_text` for the day `offset` days into
/// a trip beginning on `start`.
pub fn weekday_index(start: NaiveDate, offset: usize) -> usize {
    (start.weekday().num_days_from_monday() as usize + offset) % DAYS_PER_WEEK
}

/// Splits `"Monday: 9:00 AM – 5:00 PM"` into the day name and the hours.
/// Only the first `": "` separates; the hours keep their own colons.
pub fn parse_weekday_text(entry: &str) -> (Option<&str>, &str) {
    match entry.split_once(": ") {
        Some((day, hours)) => (Some(day.trim()), hours.trim()),
        None => (None, entry.trim()),
    }
}

pub fn hours_for(opening_hours: Option<&OpeningHours>, index: usize) -> DayHours {
    let weekday_text = match opening_hours {
        Some(hours) if hours.weekday_text.len() >= DAYS_PER_WEEK => &hours.weekday_text,
        _ => return DayHours::Unknown,
    };

    let (_, hours) = parse_weekday_text(&weekday_text[index % DAYS_PER_WEEK]);
    if hours.eq_ignore_ascii_case("closed") {
        DayHours::Closed
    } else {
        DayHours::Open(hours.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn week(closed_on: &[usize]) -> OpeningHours {
        let names = [
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
            "Sunday",
        ];
        OpeningHours {
            weekday_text: names
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    if closed_on.contains(&i) {
                        format!("{}: Closed", name)
                    } else {
                        format!("{}: 9:00 AM – 5:00 PM", name)
                    }
                })
                .collect(),
        }
    }

    #[test]
    fn test_date_range_inclusive() {
        let days = date_range(date(2024, 2, 27), date(2024, 3, 2));
        assert_eq!(
            days,
            vec![
                date(2024, 2, 27),
                date(2024, 2, 28),
                date(2024, 2, 29),
                date(2024, 3, 1),
                date(2024, 3, 2),
            ]
        );
        assert_eq!(date_range(date(2024, 3, 1), date(2024, 3, 1)).len(), 1);
        assert!(date_range(date(2024, 3, 2), date(2024, 3, 1)).is_empty());
    }

    #[test]
    fn test_weekday_index_wraps_past_sunday() {
        // 2024-03-02 is a Saturday.
        let start = date(2024, 3, 2);
        let indices: Vec<usize> = (0..9).map(|offset| weekday_index(start, offset)).collect();
        assert_eq!(indices, vec![5, 6, 0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_weekday_index_matches_calendar() {
        let start = date(2024, 1, 1);
        for offset in 0..30 {
            let day = start + chrono::Duration::days(offset as i64);
            assert_eq!(
                weekday_index(start, offset),
                day.weekday().num_days_from_monday() as usize
            );
        }
    }

    #[test]
    fn test_parse_weekday_text() {
        assert_eq!(
            parse_weekday_text("Monday: 9:00 AM – 5:00 PM"),
            (Some("Monday"), "9:00 AM – 5:00 PM")
        );
        assert_eq!(parse_weekday_text("Sunday: Closed"), (Some("Sunday"), "Closed"));
        assert_eq!(parse_weekday_text("Open 24 hours"), (None, "Open 24 hours"));
    }

    #[test]
    fn test_hours_for() {
        let hours = week(&[0]);
        assert_eq!(hours_for(Some(&hours), 0), DayHours::Closed);
        assert_eq!(
            hours_for(Some(&hours), 1),
            DayHours::Open("9:00 AM – 5:00 PM".to_string())
        );
        assert_eq!(hours_for(None, 3), DayHours::Unknown);

        let partial = OpeningHours {
            weekday_text: vec!["Monday: Closed".to_string()],
        };
        assert_eq!(hours_for(Some(&partial), 0), DayHours::Unknown);
    }
}
