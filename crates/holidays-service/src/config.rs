//! Service configuration.

use std::time::Duration;

use holidays_core::TimeZoneSpec;

/// Configuration for a [`HolidayService`](crate::HolidayService).
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// How long a fetched year stays valid.
    pub cache_ttl: Duration,

    /// Zone in which day, week and month boundaries are interpreted.
    pub zone: TimeZoneSpec,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Self::DEFAULT_CACHE_TTL,
            zone: TimeZoneSpec::Local,
        }
    }
}

impl ServiceConfig {
    /// Default cache lifetime: 24 hours.
    pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

    /// Creates a configuration using the given zone and the default TTL.
    pub fn new(zone: TimeZoneSpec) -> Self {
        Self {
            zone,
            ..Default::default()
        }
    }

    /// Builder: set cache TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Builder: set time zone.
    pub fn with_zone(mut self, zone: TimeZoneSpec) -> Self {
        self.zone = zone;
        self
    }
}
