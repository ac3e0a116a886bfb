//! Google Calendar holiday source.
//!
//! Reads a public calendar (such as Google's national-holiday calendars)
//! through the Calendar API v3 events endpoint, authenticating with an API
//! key.
//!
//! # Example
//!
//! ```ignore
//! use holidays_providers::google::{GoogleConfig, GoogleHolidaySource};
//!
//! let config = GoogleConfig::from_env();
//! let source = GoogleHolidaySource::new(config)?;
//! let events = source.fetch_events(window).await?;
//! ```

mod client;
mod config;
mod source;

pub use client::GoogleCalendarClient;
pub use config::GoogleConfig;
pub use source::GoogleHolidaySource;
