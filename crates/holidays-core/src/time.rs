//! Time types for holiday events.
//!
//! This module provides [`EventTime`] for representing event start/end times
//! (which may be either a specific datetime or an all-day date),
//! [`DateRange`] for the inclusive wall-clock ranges that calendar views ask
//! about, and [`TimeZoneSpec`] for the zone those wall-clock ranges live in.

use chrono::{
    DateTime, Datelike, Days, Duration, FixedOffset, Local, LocalResult, NaiveDate,
    NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Represents the time of a holiday event.
///
/// Calendar events can have two types of times:
/// - **DateTime**: A specific point in time (stored as UTC)
/// - **AllDay**: A date without a specific time
///
/// Serialized untagged, so an all-day time is `"2024-01-26"` and an instant
/// is an RFC 3339 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventTime {
    /// A specific datetime, stored in UTC.
    DateTime(DateTime<Utc>),
    /// An all-day event date (no specific time).
    AllDay(NaiveDate),
}

impl EventTime {
    /// Creates a new `EventTime::DateTime` from a UTC datetime.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }

    /// Creates a new `EventTime::AllDay` from a date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::AllDay(date)
    }

    /// Returns `true` if this is an all-day event time.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::AllDay(_))
    }

    /// Returns the datetime if this is a `DateTime` variant.
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::DateTime(dt) => Some(dt),
            Self::AllDay(_) => None,
        }
    }

    /// Returns the date if this is an `AllDay` variant.
    pub fn as_date(&self) -> Option<&NaiveDate> {
        match self {
            Self::AllDay(d) => Some(d),
            Self::DateTime(_) => None,
        }
    }

    /// Returns the wall-clock time of this event time in `zone`.
    ///
    /// An all-day date maps to midnight of that date; an instant is
    /// converted into the zone.
    pub fn wall_clock(&self, zone: &TimeZoneSpec) -> NaiveDateTime {
        match self {
            Self::DateTime(dt) => zone.to_wall_clock(*dt),
            Self::AllDay(date) => date.and_time(NaiveTime::MIN),
        }
    }

    /// Converts to a UTC datetime for ordering. All-day dates sort at
    /// midnight UTC.
    fn sort_key(&self) -> DateTime<Utc> {
        match self {
            Self::DateTime(dt) => *dt,
            Self::AllDay(date) => date.and_time(NaiveTime::MIN).and_utc(),
        }
    }
}

impl PartialOrd for EventTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

/// The zone in which wall-clock ranges are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeZoneSpec {
    /// The system's local time zone.
    #[default]
    Local,
    /// A fixed offset from UTC.
    Fixed(FixedOffset),
}

impl TimeZoneSpec {
    /// UTC as a fixed zone.
    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }

    /// Parses `local`, `utc`/`z`, or an offset such as `+05:30`, `-0800`
    /// or `+9`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("local") {
            return Some(Self::Local);
        }
        if s.eq_ignore_ascii_case("utc") || s.eq_ignore_ascii_case("z") {
            return Some(Self::utc());
        }

        let (sign, rest) = match s.as_bytes().first()? {
            b'+' => (1, &s[1..]),
            b'-' => (-1, &s[1..]),
            _ => return None,
        };
        let (hours, minutes) = match rest.split_once(':') {
            Some((h, m)) => (h, m),
            None if rest.len() == 4 => rest.split_at(2),
            None => (rest, "0"),
        };
        let hours: i32 = hours.parse().ok()?;
        let minutes: i32 = minutes.parse().ok()?;
        if hours > 23 || !(0..60).contains(&minutes) {
            return None;
        }
        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).map(Self::Fixed)
    }

    /// Converts a UTC instant to wall-clock time in this zone.
    ///
    /// An instant whose local time is not representable is returned as UTC.
    pub fn to_wall_clock(&self, dt: DateTime<Utc>) -> NaiveDateTime {
        let utc = dt.naive_utc();
        let offset = match self {
            Self::Local => Local.offset_from_utc_datetime(&utc).fix(),
            Self::Fixed(offset) => *offset,
        };
        utc.checked_add_signed(Duration::seconds(i64::from(offset.local_minus_utc())))
            .unwrap_or(utc)
    }

    /// Converts a wall-clock time in this zone to a UTC instant.
    ///
    /// Ambiguous times (DST fall-back) resolve to the earlier instant; times
    /// inside a DST gap resolve to the first instant after the gap.
    pub fn to_utc(&self, wall: NaiveDateTime) -> DateTime<Utc> {
        match self {
            Self::Local => resolve_local(&Local, wall),
            Self::Fixed(offset) => resolve_local(offset, wall),
        }
    }

    /// Returns today's date in this zone.
    pub fn today(&self) -> NaiveDate {
        self.to_wall_clock(Utc::now()).date()
    }
}

impl fmt::Display for TimeZoneSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

fn resolve_local<Tz: TimeZone>(tz: &Tz, wall: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&wall) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => wall
            .checked_add_signed(Duration::hours(1))
            .and_then(|after_gap| tz.from_local_datetime(&after_gap).earliest())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| wall.and_utc()),
    }
}

/// An inclusive range of wall-clock times `[start, end]`.
///
/// An inverted range (start after end) contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Start of the range (inclusive).
    pub start: NaiveDateTime,
    /// End of the range (inclusive).
    pub end: NaiveDateTime,
}

impl DateRange {
    /// Creates a new range.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// `[date 00:00:00.000, date 23:59:59.999]`.
    pub fn for_day(date: NaiveDate) -> Self {
        Self {
            start: date.and_time(NaiveTime::MIN),
            end: last_millisecond_of(date),
        }
    }

    /// The seven days starting at `start_of_week`, ending at
    /// 23:59:59.999 of the sixth day after it.
    ///
    /// The start is taken as given; no weekday alignment is applied.
    /// Returns `None` when the week runs past the last representable date.
    pub fn for_week(start_of_week: NaiveDate) -> Option<Self> {
        let last = start_of_week.checked_add_days(Days::new(6))?;
        Some(Self {
            start: start_of_week.and_time(NaiveTime::MIN),
            end: last_millisecond_of(last),
        })
    }

    /// `[day 1 00:00:00, last day 23:59:59]` of a month.
    ///
    /// `month_index` is 0-based (0 = January, 11 = December). Returns `None`
    /// for an index outside `0..=11` or an unrepresentable year.
    pub fn for_month(year: i32, month_index: u32) -> Option<Self> {
        if month_index > 11 {
            return None;
        }
        let first = NaiveDate::from_ymd_opt(year, month_index + 1, 1)?;
        let next_first = if month_index == 11 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month_index + 2, 1)?
        };
        let last = next_first.pred_opt()?;

        Some(Self {
            start: first.and_time(NaiveTime::MIN),
            end: last.and_hms_opt(23, 59, 59)?,
        })
    }

    /// `[Jan 1 00:00:00, Dec 31 23:59:59]` of a year.
    pub fn for_year(year: i32) -> Option<Self> {
        Some(Self {
            start: NaiveDate::from_ymd_opt(year, 1, 1)?.and_time(NaiveTime::MIN),
            end: NaiveDate::from_ymd_opt(year, 12, 31)?.and_hms_opt(23, 59, 59)?,
        })
    }

    /// Returns true if `t` lies within the range, both ends included.
    pub fn contains(&self, t: NaiveDateTime) -> bool {
        self.start <= t && t <= self.end
    }

    /// The calendar year the range starts in.
    pub fn year(&self) -> i32 {
        self.start.year()
    }

    /// The range as UTC instants, interpreting both ends in `zone`.
    pub fn to_utc(&self, zone: &TimeZoneSpec) -> (DateTime<Utc>, DateTime<Utc>) {
        (zone.to_utc(self.start), zone.to_utc(self.end))
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} .. {}]", self.start, self.end)
    }
}

const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_milli_opt(23, 59, 59, 999) {
    Some(t) => t,
    None => NaiveTime::MIN,
};

fn last_millisecond_of(date: NaiveDate) -> NaiveDateTime {
    date.and_time(END_OF_DAY)
}
