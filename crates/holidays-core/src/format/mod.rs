//! Output formatting for holiday lists.
//!
//! - **TTY**: one line per holiday, `YYYY-MM-DD  Title` for all-day holidays
//!   and `YYYY-MM-DD HH:MM  Title` for timed ones
//! - **JSON**: the [`HolidayEvent`] list as-is (serialized by the caller)

#[cfg(test)]
mod golden_tests;

use serde::{Deserialize, Serialize};

use crate::event::HolidayEvent;
use crate::time::TimeZoneSpec;

/// Default text shown when a list is empty.
pub const DEFAULT_NO_HOLIDAY_TEXT: &str = "No holidays";

/// The output format for holiday display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable terminal output.
    #[default]
    Tty,
    /// Machine-readable JSON output.
    Json,
}

/// Formats holidays for terminal output.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    zone: TimeZoneSpec,
    no_holiday_text: String,
    show_description: bool,
}

impl OutputFormatter {
    /// Creates a formatter that renders timed holidays in `zone`.
    pub fn new(zone: TimeZoneSpec) -> Self {
        Self {
            zone,
            no_holiday_text: DEFAULT_NO_HOLIDAY_TEXT.to_string(),
            show_description: false,
        }
    }

    /// Sets the text shown for an empty list.
    pub fn with_no_holiday_text(mut self, text: impl Into<String>) -> Self {
        self.no_holiday_text = text.into();
        self
    }

    /// Appends non-empty descriptions after the title.
    pub fn with_descriptions(mut self, show: bool) -> Self {
        self.show_description = show;
        self
    }

    /// Formats a list, one holiday per line.
    pub fn format_tty(&self, holidays: &[HolidayEvent]) -> String {
        if holidays.is_empty() {
            return self.no_holiday_text.clone();
        }
        holidays
            .iter()
            .map(|h| self.format_line(h))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Formats a single holiday.
    pub fn format_line(&self, holiday: &HolidayEvent) -> String {
        let when = if holiday.is_all_day {
            holiday.wall_clock_start(&self.zone).format("%Y-%m-%d").to_string()
        } else {
            holiday
                .wall_clock_start(&self.zone)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        };

        let description = holiday.description.trim();
        if self.show_description && !description.is_empty() {
            format!("{when}  {} ({})", holiday.title, description)
        } else {
            format!("{when}  {}", holiday.title)
        }
    }

    /// Formats a list of holiday names, one per line.
    pub fn format_names(&self, names: &[String]) -> String {
        if names.is_empty() {
            return self.no_holiday_text.clone();
        }
        names.join("\n")
    }
}
