//! HolidaySource trait definition.
//!
//! A [`HolidaySource`] is anything that can list the events of a holiday
//! calendar for a time window. The service layer only ever talks to this
//! trait, which keeps the network out of its tests.

use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};

use crate::error::{ProviderError, ProviderResult};
use crate::raw_event::RawEvent;

/// A boxed future for async trait methods.
///
/// Boxed so the trait stays object-safe and can sit behind `Arc<dyn HolidaySource>`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The UTC window events are requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    /// Lower bound for event start.
    pub time_min: DateTime<Utc>,
    /// Upper bound for event start.
    pub time_max: DateTime<Utc>,
}

impl FetchWindow {
    /// Creates a new window.
    pub fn new(time_min: DateTime<Utc>, time_max: DateTime<Utc>) -> Self {
        Self { time_min, time_max }
    }
}

/// A calendar backend that can list holiday events.
///
/// Implementations must return single (already expanded) events ordered by
/// start time, and must fetch every page of a window before returning.
pub trait HolidaySource: Send + Sync {
    /// Returns the name of this source (e.g., "google").
    fn name(&self) -> &str;

    /// Fetches all events in the window.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the source is not configured, the
    /// request fails, or the response cannot be parsed.
    fn fetch_events(&self, window: FetchWindow) -> BoxFuture<'_, ProviderResult<Vec<RawEvent>>>;
}

/// A source that always returns an error.
///
/// Stands in for a source that failed to initialize so callers still get
/// the usual empty-result behaviour.
#[derive(Debug)]
pub struct ErrorSource {
    name: String,
    error: ProviderError,
}

impl ErrorSource {
    /// Creates a new error source.
    pub fn new(name: impl Into<String>, error: ProviderError) -> Self {
        Self {
            name: name.into(),
            error,
        }
    }
}

impl HolidaySource for ErrorSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_events(&self, _window: FetchWindow) -> BoxFuture<'_, ProviderResult<Vec<RawEvent>>> {
        // ProviderError is not Clone; rebuild it from its parts
        let error =
            ProviderError::new(self.error.code(), self.error.message()).with_provider(&self.name);
        Box::pin(async move { Err(error) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;

    #[tokio::test]
    async fn error_source_returns_error() {
        let source = ErrorSource::new("google", ProviderError::configuration("bad api base"));
        assert_eq!(source.name(), "google");

        let now = Utc::now();
        let err = source
            .fetch_events(FetchWindow::new(now, now))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::ConfigurationError);
        assert_eq!(err.provider(), Some("google"));
        assert_eq!(err.message(), "bad api base");
    }
}
