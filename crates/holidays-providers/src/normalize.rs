//! RawEvent to HolidayEvent conversion.

use holidays_core::{EventTime, HolidayEvent};

use crate::raw_event::{RawEvent, RawEventTime};

/// Converts a [`RawEvent`] to a [`HolidayEvent`].
///
/// `is_all_day` follows the start time; a missing description becomes an
/// empty string.
pub fn normalize_event(raw: &RawEvent) -> HolidayEvent {
    HolidayEvent::new(
        &raw.id,
        raw.title(),
        convert_time(&raw.start),
        convert_time(&raw.end),
    )
    .with_description(raw.description.clone().unwrap_or_default())
}

fn convert_time(raw: &RawEventTime) -> EventTime {
    match raw {
        RawEventTime::DateTime(dt) => EventTime::from_utc(*dt),
        RawEventTime::Date(date) => EventTime::from_date(*date),
    }
}

/// Batch normalize raw events, dropping cancelled ones.
pub fn normalize_events(raw_events: &[RawEvent]) -> Vec<HolidayEvent> {
    raw_events
        .iter()
        .filter(|e| !e.is_cancelled())
        .map(normalize_event)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn all_day_event() {
        let raw = RawEvent::new(
            "x1",
            RawEventTime::Date(date(2024, 1, 26)),
            RawEventTime::Date(date(2024, 1, 27)),
            "cal",
        )
        .with_summary("Holiday A");

        let h = normalize_event(&raw);
        assert_eq!(h.id, "holiday-x1");
        assert_eq!(h.title, "Holiday A");
        assert_eq!(h.description, "");
        assert!(h.is_all_day);
        assert_eq!(h.start, EventTime::from_date(date(2024, 1, 26)));
        assert_eq!(h.end, EventTime::from_date(date(2024, 1, 27)));
        assert_eq!(h.category, "holidays");
    }

    #[test]
    fn timed_event() {
        let start: DateTime<Utc> = "2024-03-20T03:06:00Z".parse().unwrap();
        let raw = RawEvent::new(
            "eq",
            RawEventTime::DateTime(start),
            RawEventTime::DateTime(start),
            "cal",
        )
        .with_summary("March Equinox")
        .with_description("Observance");

        let h = normalize_event(&raw);
        assert!(!h.is_all_day);
        assert_eq!(h.description, "Observance");
        assert_eq!(h.start.as_datetime(), Some(&start));
    }

    #[test]
    fn batch_skips_cancelled() {
        let d = RawEventTime::Date(date(2024, 5, 1));
        let raws = vec![
            RawEvent::new("a", d, d, "cal").with_summary("Kept"),
            RawEvent::new("b", d, d, "cal")
                .with_summary("Dropped")
                .with_status("cancelled"),
        ];

        let holidays = normalize_events(&raws);
        assert_eq!(holidays.len(), 1);
        assert_eq!(holidays[0].title, "Kept");
    }
}
