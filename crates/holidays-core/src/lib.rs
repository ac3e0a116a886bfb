//! Core types: holiday events, date ranges, formatting, tracing

pub mod event;
pub mod format;
pub mod time;
pub mod tracing;

pub use event::{
    HOLIDAY_CATEGORY, HOLIDAY_COLOR, HOLIDAY_ID_PREFIX, HolidayEvent, filter_by_range,
};
pub use format::{DEFAULT_NO_HOLIDAY_TEXT, OutputFormat, OutputFormatter};
pub use time::{DateRange, EventTime, TimeZoneSpec};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
