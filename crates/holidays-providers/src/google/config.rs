//! Google Calendar source configuration.

use std::time::Duration;

use url::Url;

/// Configuration for reading a public Google calendar with an API key.
#[derive(Clone)]
pub struct GoogleConfig {
    /// API key sent as the `key` query parameter.
    ///
    /// Optional: without it every fetch fails with a configuration error
    /// and callers see no holidays.
    pub api_key: Option<String>,

    /// The calendar to read, e.g. `en.indian#holiday@group.v.calendar.google.com`.
    pub calendar_id: String,

    /// Base URL of the Calendar API, up to and excluding `/calendars`.
    pub api_base: String,

    /// Request timeout.
    pub timeout: Duration,

    /// User agent string for API requests.
    pub user_agent: String,
}

impl GoogleConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Base URL for Google Calendar API v3.
    pub const DEFAULT_API_BASE: &'static str = "https://www.googleapis.com/calendar/v3";

    /// Google's public Indian holidays calendar.
    pub const DEFAULT_CALENDAR_ID: &'static str = "en.indian#holiday@group.v.calendar.google.com";

    /// Environment variable holding the API key.
    pub const API_KEY_ENV: &'static str = "GOOGLE_CALENDAR_API_KEY";

    /// Environment variable holding the calendar id.
    pub const CALENDAR_ID_ENV: &'static str = "INDIAN_HOLIDAYS_CALENDAR_ID";

    /// Creates a configuration for the given calendar, without an API key.
    pub fn new(calendar_id: impl Into<String>) -> Self {
        Self {
            api_key: None,
            calendar_id: calendar_id.into(),
            api_base: Self::DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("holidays/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Builds a configuration from `GOOGLE_CALENDAR_API_KEY` and
    /// `INDIAN_HOLIDAYS_CALENDAR_ID`, falling back to the default calendar.
    pub fn from_env() -> Self {
        let calendar_id = non_empty_env(Self::CALENDAR_ID_ENV)
            .unwrap_or_else(|| Self::DEFAULT_CALENDAR_ID.to_string());
        let mut config = Self::new(calendar_id);
        config.api_key = non_empty_env(Self::API_KEY_ENV);
        config
    }

    /// Sets the API key. An empty key is treated as no key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let key = api_key.into();
        self.api_key = (!key.trim().is_empty()).then_some(key);
        self
    }

    /// Sets the API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns true if an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Validates the configuration.
    ///
    /// A missing API key is not a validation error.
    pub fn validate(&self) -> Result<(), String> {
        if self.calendar_id.trim().is_empty() {
            return Err("calendar_id must not be empty".to_string());
        }
        let base = Url::parse(&self.api_base)
            .map_err(|e| format!("invalid api_base '{}': {}", self.api_base, e))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(format!("api_base must be http(s), got '{}'", base.scheme()));
        }
        if self.timeout.is_zero() {
            return Err("timeout must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl std::fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("calendar_id", &self.calendar_id)
            .field("api_base", &self.api_base)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GoogleConfig::new(GoogleConfig::DEFAULT_CALENDAR_ID);
        assert!(!config.has_api_key());
        assert_eq!(config.api_base, "https://www.googleapis.com/calendar/v3");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("holidays/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_api_key_is_no_key() {
        let config = GoogleConfig::new("cal").with_api_key("  ");
        assert!(!config.has_api_key());

        let config = GoogleConfig::new("cal").with_api_key("AIza-test");
        assert_eq!(config.api_key.as_deref(), Some("AIza-test"));
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(GoogleConfig::new("").validate().is_err());
        assert!(
            GoogleConfig::new("cal")
                .with_api_base("not a url")
                .validate()
                .is_err()
        );
        assert!(
            GoogleConfig::new("cal")
                .with_api_base("ftp://example.com")
                .validate()
                .is_err()
        );
        assert!(
            GoogleConfig::new("cal")
                .with_timeout(Duration::ZERO)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn debug_redacts_key() {
        let config = GoogleConfig::new("cal").with_api_key("secret-key");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }
}
