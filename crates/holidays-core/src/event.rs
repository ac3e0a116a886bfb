//! Holiday event type.
//!
//! [`HolidayEvent`] is the uniform shape every holiday takes once it leaves
//! a provider, whatever calendar it was read from.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::time::{DateRange, EventTime, TimeZoneSpec};

/// Category tag carried by every holiday event.
pub const HOLIDAY_CATEGORY: &str = "holidays";

/// Display color for the holidays category.
pub const HOLIDAY_COLOR: &str = "#9E69AF";

/// Prefix added to source event ids.
pub const HOLIDAY_ID_PREFIX: &str = "holiday-";

/// A normalized holiday record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayEvent {
    /// Unique identifier, `holiday-` followed by the source event id.
    pub id: String,
    /// Display name of the holiday.
    pub title: String,
    /// Description, empty when the source has none.
    pub description: String,
    /// When the holiday starts.
    pub start: EventTime,
    /// When the holiday ends.
    pub end: EventTime,
    /// True when the source encodes a calendar date rather than a timestamp.
    pub is_all_day: bool,
    /// Always true.
    pub is_holiday: bool,
    /// Always [`HOLIDAY_CATEGORY`].
    pub category: String,
    /// Always [`HOLIDAY_COLOR`].
    pub color: String,
}

impl HolidayEvent {
    /// Creates a holiday from a source event id, title and times.
    ///
    /// `is_all_day` is derived from `start`.
    pub fn new(
        source_id: &str,
        title: impl Into<String>,
        start: EventTime,
        end: EventTime,
    ) -> Self {
        Self {
            id: format!("{HOLIDAY_ID_PREFIX}{source_id}"),
            title: title.into(),
            description: String::new(),
            is_all_day: start.is_all_day(),
            start,
            end,
            is_holiday: true,
            category: HOLIDAY_CATEGORY.to_string(),
            color: HOLIDAY_COLOR.to_string(),
        }
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The id of the event this holiday was built from.
    pub fn source_id(&self) -> &str {
        self.id.strip_prefix(HOLIDAY_ID_PREFIX).unwrap_or(&self.id)
    }

    /// The start as wall-clock time in `zone`.
    pub fn wall_clock_start(&self, zone: &TimeZoneSpec) -> NaiveDateTime {
        self.start.wall_clock(zone)
    }

    /// Returns true if the holiday's start falls within `range`.
    pub fn starts_within(&self, range: &DateRange, zone: &TimeZoneSpec) -> bool {
        range.contains(self.wall_clock_start(zone))
    }
}

/// Returns the holidays whose start falls within `range`, in input order.
pub fn filter_by_range(
    holidays: &[HolidayEvent],
    range: &DateRange,
    zone: &TimeZoneSpec,
) -> Vec<HolidayEvent> {
    holidays
        .iter()
        .filter(|h| h.starts_within(range, zone))
        .cloned()
        .collect()
}
