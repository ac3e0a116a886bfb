//! Holiday cache and range queries.
//!
//! [`HolidayService`] fetches a whole calendar year of holidays from a
//! [`HolidaySource`](holidays_providers::HolidaySource), keeps it for a
//! configurable TTL (24 hours by default) and answers day, week and month
//! queries by filtering the cached year.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use chrono::NaiveDate;
//! use holidays_providers::google::{GoogleConfig, GoogleHolidaySource};
//! use holidays_service::{HolidayService, ServiceConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = GoogleHolidaySource::new(GoogleConfig::from_env())?;
//!     let service = HolidayService::new(Arc::new(source), ServiceConfig::default());
//!
//!     let date = NaiveDate::from_ymd_opt(2024, 1, 26).unwrap();
//!     for name in service.holiday_names(date).await {
//!         println!("{name}");
//!     }
//!     Ok(())
//! }
//! ```

mod cache;
mod config;
mod service;

pub use cache::{CacheEntry, HolidayCache};
pub use config::ServiceConfig;
pub use service::HolidayService;
