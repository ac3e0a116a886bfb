//! HolidaySource trait and implementations.
//!
//! - [`HolidaySource`] - The trait every holiday backend implements
//! - [`RawEvent`] - Event data as it comes from a backend
//! - [`normalize_event`] - Conversion from raw events to [`HolidayEvent`](holidays_core::HolidayEvent)
//! - [`ProviderError`] - Error types for source operations
//!
//! ```text
//! ┌─────────────────────┐
//! │ Google Calendar API │
//! └──────────┬──────────┘
//!            ▼
//! ┌─────────────────────┐
//! │ GoogleHolidaySource │  HolidaySource
//! └──────────┬──────────┘
//!            ▼
//!      ┌──────────┐
//!      │ RawEvent │
//!      └────┬─────┘
//!           ▼ normalize_event()
//!   ┌──────────────┐
//!   │ HolidayEvent │
//!   └──────────────┘
//! ```

pub mod error;
#[cfg(feature = "google")]
pub mod google;
pub mod normalize;
pub mod raw_event;
pub mod source;

pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use normalize::{normalize_event, normalize_events};
pub use raw_event::{RawEvent, RawEventTime};
pub use source::{BoxFuture, ErrorSource, FetchWindow, HolidaySource};
