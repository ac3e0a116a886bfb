//! [`HolidaySource`] implementation for a public Google calendar.

use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::raw_event::RawEvent;
use crate::source::{BoxFuture, FetchWindow, HolidaySource};

use super::client::GoogleCalendarClient;
use super::config::GoogleConfig;

const PROVIDER_NAME: &str = "google";

/// Reads holidays from a public Google calendar with an API key.
///
/// Constructing the source never fails because the key is missing; the
/// missing key surfaces as a configuration error on each fetch instead.
#[derive(Debug)]
pub struct GoogleHolidaySource {
    config: GoogleConfig,
    client: Option<GoogleCalendarClient>,
}

impl GoogleHolidaySource {
    /// Creates a new source.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if [`GoogleConfig::validate`] fails, or
    /// an internal error if the HTTP client cannot be built.
    pub fn new(config: GoogleConfig) -> ProviderResult<Self> {
        config.validate().map_err(|e| {
            ProviderError::configuration(e).with_provider(PROVIDER_NAME)
        })?;

        let client = config
            .api_key
            .as_deref()
            .map(|key| {
                GoogleCalendarClient::new(&config.api_base, key, config.timeout, &config.user_agent)
            })
            .transpose()?;

        Ok(Self { config, client })
    }

    /// The calendar this source reads.
    pub fn calendar_id(&self) -> &str {
        &self.config.calendar_id
    }
}

impl HolidaySource for GoogleHolidaySource {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn fetch_events(&self, window: FetchWindow) -> BoxFuture<'_, ProviderResult<Vec<RawEvent>>> {
        Box::pin(async move {
            let Some(client) = self.client.as_ref() else {
                return Err(ProviderError::configuration(format!(
                    "Google Calendar API key not found. Set {} or [google].api_key in the config file.",
                    GoogleConfig::API_KEY_ENV
                ))
                .with_provider(PROVIDER_NAME));
            };

            debug!(
                calendar_id = %self.config.calendar_id,
                time_min = %window.time_min,
                time_max = %window.time_max,
                "requesting holiday events"
            );

            client
                .list_events(&self.config.calendar_id, window.time_min, window.time_max)
                .await
                .map_err(|e| e.with_provider(PROVIDER_NAME))
        })
    }
}
