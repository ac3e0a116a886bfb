//! Golden tests for output formatting.
//!
//! These tests use insta for snapshot testing to ensure output format stability.
//! Run with `cargo insta review` to update snapshots after intentional changes.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::event::HolidayEvent;
use crate::format::OutputFormatter;
use crate::time::{EventTime, TimeZoneSpec};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn all_day(id: &str, title: &str, d: NaiveDate) -> HolidayEvent {
    HolidayEvent::new(
        id,
        title,
        EventTime::from_date(d),
        EventTime::from_date(d.succ_opt().unwrap()),
    )
}

#[test]
fn golden_tty_mixed_month() {
    let start = Utc.with_ymd_and_hms(2024, 3, 25, 4, 0, 0).unwrap();
    let holidays = vec![
        all_day("holi", "Holi", date(2024, 3, 25)),
        HolidayEvent::new(
            "eq",
            "March Equinox",
            EventTime::from_utc(start),
            EventTime::from_utc(start),
        ),
        all_day("gf", "Good Friday", date(2024, 3, 29)),
    ];

    let ist = TimeZoneSpec::parse("+05:30").unwrap();
    let output = OutputFormatter::new(ist).format_tty(&holidays);

    insta::assert_snapshot!("tty_mixed_month", output);
}
