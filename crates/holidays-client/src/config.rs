//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/holidays/config.toml` by default. Command-line flags and
//! their environment variables take precedence over the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use holidays_core::TimeZoneSpec;
use holidays_providers::google::GoogleConfig;
use holidays_service::ServiceConfig;

const REDACTED: &str = "<redacted>";

/// Configuration for the holidays client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Google Calendar settings.
    pub google: GoogleSettings,

    /// Cache settings.
    pub cache: CacheSettings,

    /// Display settings.
    pub display: DisplaySettings,
}

/// Google Calendar source settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleSettings {
    /// API key for the Calendar API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Calendar to read holidays from.
    pub calendar_id: String,

    /// Base URL of the Calendar API.
    pub api_base: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GoogleSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            calendar_id: GoogleConfig::DEFAULT_CALENDAR_ID.to_string(),
            api_base: GoogleConfig::DEFAULT_API_BASE.to_string(),
            timeout_secs: GoogleConfig::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl std::fmt::Debug for GoogleSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| REDACTED))
            .field("calendar_id", &self.calendar_id)
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl GoogleSettings {
    /// Converts to provider configuration.
    pub fn to_provider_config(&self) -> GoogleConfig {
        let mut config = GoogleConfig::new(&self.calendar_id)
            .with_api_base(&self.api_base)
            .with_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(ref key) = self.api_key {
            config = config.with_api_key(key);
        }
        config
    }
}

/// Cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// How long a fetched year is reused, in hours.
    pub ttl_hours: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { ttl_hours: 24 }
    }
}

/// Display settings for output formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// UTC offset such as `+05:30`; the system zone when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<String>,

    /// Text to show when there are no holidays.
    pub no_holiday_text: String,

    /// Append descriptions to holiday titles.
    pub show_description: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            utc_offset: None,
            no_holiday_text: holidays_core::DEFAULT_NO_HOLIDAY_TEXT.to_string(),
            show_description: false,
        }
    }
}

/// Values given on the command line (or through their environment
/// variables) that override the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub calendar_id: Option<String>,
    pub utc_offset: Option<String>,
    pub show_description: bool,
}

impl ClientConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("holidays")
    }

    /// Applies command-line overrides. Empty values are ignored.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(key) = non_empty(&overrides.api_key) {
            self.google.api_key = Some(key.to_string());
        }
        if let Some(id) = non_empty(&overrides.calendar_id) {
            self.google.calendar_id = id.to_string();
        }
        if let Some(offset) = non_empty(&overrides.utc_offset) {
            self.display.utc_offset = Some(offset.to_string());
        }
        if overrides.show_description {
            self.display.show_description = true;
        }
    }

    /// The zone dates are interpreted in.
    pub fn zone(&self) -> Result<TimeZoneSpec, String> {
        match self.display.utc_offset.as_deref() {
            None => Ok(TimeZoneSpec::Local),
            Some(offset) => TimeZoneSpec::parse(offset)
                .ok_or_else(|| format!("invalid utc_offset '{}'", offset)),
        }
    }

    /// Builds the service configuration.
    pub fn service_config(&self) -> Result<ServiceConfig, String> {
        let ttl = Duration::from_secs(self.cache.ttl_hours.saturating_mul(60 * 60));
        Ok(ServiceConfig::new(self.zone()?).with_cache_ttl(ttl))
    }

    /// Returns a copy safe to print, with the API key replaced.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.google.api_key.is_some() {
            config.google.api_key = Some(REDACTED.to_string());
        }
        config
    }

    /// Returns every problem that makes the configuration unusable.
    ///
    /// A missing API key is not listed: it only means no holidays are shown.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if let Err(e) = self.google.to_provider_config().validate() {
            problems.push(e);
        }
        if self.cache.ttl_hours == 0 {
            problems.push("cache.ttl_hours must be greater than zero".to_string());
        }
        if let Err(e) = self.zone() {
            problems.push(e);
        }
        problems
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert!(config.google.api_key.is_none());
        assert_eq!(
            config.google.calendar_id,
            "en.indian#holiday@group.v.calendar.google.com"
        );
        assert_eq!(config.google.timeout_secs, 30);
        assert_eq!(config.cache.ttl_hours, 24);
        assert_eq!(config.display.no_holiday_text, "No holidays");
        assert_eq!(config.zone().unwrap(), TimeZoneSpec::Local);
        assert!(config.problems().is_empty());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[google]
api_key = "file-key"
calendar_id = "en.usa#holiday@group.v.calendar.google.com"
timeout_secs = 10

[cache]
ttl_hours = 6

[display]
utc_offset = "+05:30"
"#
        )
        .unwrap();

        let config = ClientConfig::load_from(file.path()).unwrap();
        assert_eq!(config.google.api_key.as_deref(), Some("file-key"));
        assert_eq!(
            config.google.calendar_id,
            "en.usa#holiday@group.v.calendar.google.com"
        );
        assert_eq!(config.google.api_base, GoogleConfig::DEFAULT_API_BASE);
        assert_eq!(config.google.timeout_secs, 10);

        let service = config.service_config().unwrap();
        assert_eq!(service.cache_ttl, Duration::from_secs(6 * 3600));
        assert_eq!(
            service.zone,
            TimeZoneSpec::Fixed(FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap())
        );
    }

    #[test]
    fn load_from_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.contains("failed to read config"));
    }

    #[test]
    fn load_from_invalid_toml_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[cache]\nttl_hours = \"soon\"\n").unwrap();
        let err = ClientConfig::load_from(file.path()).unwrap_err();
        assert!(err.contains("failed to parse config"));
    }

    #[test]
    fn empty_file_is_default() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config.cache.ttl_hours, 24);
        assert_eq!(config.google.calendar_id, GoogleConfig::DEFAULT_CALENDAR_ID);
    }

    #[test]
    fn overrides_take_precedence_over_file() {
        let mut config: ClientConfig = toml::from_str(
            r#"
[google]
api_key = "file-key"
calendar_id = "file-cal"

[display]
utc_offset = "-08:00"
"#,
        )
        .unwrap();

        config.apply_overrides(&Overrides {
            api_key: Some("cli-key".to_string()),
            calendar_id: Some("  ".to_string()),
            utc_offset: Some("utc".to_string()),
            show_description: true,
        });

        assert_eq!(config.google.api_key.as_deref(), Some("cli-key"));
        // blank override keeps the file value
        assert_eq!(config.google.calendar_id, "file-cal");
        assert_eq!(config.zone().unwrap(), TimeZoneSpec::utc());
        assert!(config.display.show_description);
    }

    #[test]
    fn no_overrides_keep_file_values() {
        let mut config = ClientConfig::default();
        config.google.api_key = Some("file-key".to_string());
        config.apply_overrides(&Overrides::default());
        assert_eq!(config.google.api_key.as_deref(), Some("file-key"));
        assert!(!config.display.show_description);
    }

    #[test]
    fn provider_config_from_settings() {
        let settings = GoogleSettings {
            api_key: Some("key".to_string()),
            calendar_id: "cal".to_string(),
            api_base: "http://localhost:8080/calendar/v3".to_string(),
            timeout_secs: 5,
        };
        let config = settings.to_provider_config();
        assert_eq!(config.api_key.as_deref(), Some("key"));
        assert_eq!(config.calendar_id, "cal");
        assert_eq!(config.api_base, "http://localhost:8080/calendar/v3");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn redacted_hides_key() {
        let mut config = ClientConfig::default();
        config.google.api_key = Some("secret-key".to_string());

        let dumped = toml::to_string_pretty(&config.redacted()).unwrap();
        assert!(!dumped.contains("secret-key"));
        assert!(dumped.contains(REDACTED));

        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-key"));
    }

    #[test]
    fn problems_are_reported() {
        let mut config = ClientConfig::default();
        config.google.calendar_id = String::new();
        config.cache.ttl_hours = 0;
        config.display.utc_offset = Some("somewhere".to_string());

        let problems = config.problems();
        assert_eq!(problems.len(), 3);
        assert!(problems.iter().any(|p| p.contains("calendar_id")));
        assert!(problems.iter().any(|p| p.contains("ttl_hours")));
        assert!(problems.iter().any(|p| p.contains("utc_offset")));
    }

    #[test]
    fn huge_ttl_saturates() {
        let config: ClientConfig =
            toml::from_str("[cache]\nttl_hours = 9223372036854775807\n").unwrap();
        let service = config.service_config().unwrap();
        assert_eq!(service.cache_ttl, Duration::from_secs(u64::MAX));
        assert!(config.problems().is_empty());
    }

    #[test]
    fn missing_key_is_not_a_problem() {
        let config = ClientConfig::default();
        assert!(config.google.api_key.is_none());
        assert!(config.problems().is_empty());
    }
}
