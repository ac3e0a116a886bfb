//! Single-year holiday cache with TTL support.
//!
//! The cache holds at most one year of holidays. Storing a different year
//! replaces the previous payload rather than adding to it.

use std::time::Duration;

use holidays_core::HolidayEvent;
use tokio::time::Instant;
use tracing::debug;

/// Cached holidays for one calendar year.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The calendar year the holidays belong to.
    pub year: i32,
    /// Every holiday of that year, in source order.
    pub holidays: Vec<HolidayEvent>,
    /// When the entry expires (monotonic clock). `None` when the TTL is too
    /// large to represent, in which case the entry never expires.
    expires_at: Option<Instant>,
}

impl CacheEntry {
    /// Creates a new cache entry with the given TTL.
    pub fn new(year: i32, holidays: Vec<HolidayEvent>, ttl: Duration) -> Self {
        Self {
            year,
            holidays,
            expires_at: Instant::now().checked_add(ttl),
        }
    }

    /// Returns true if the entry has expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|expires_at| Instant::now() >= expires_at)
    }

    /// Returns the time until expiration, `None` if the entry never expires.
    pub fn time_until_expiry(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires_at| expires_at.saturating_duration_since(Instant::now()))
    }
}

/// Holiday cache holding at most one year.
#[derive(Debug)]
pub struct HolidayCache {
    ttl: Duration,
    entry: Option<CacheEntry>,
}

impl HolidayCache {
    /// Creates an empty cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// Returns the TTL applied to new entries.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the entry regardless of expiry.
    pub fn get(&self) -> Option<&CacheEntry> {
        self.entry.as_ref()
    }

    /// Returns the entry only if it covers `year` and has not expired.
    pub fn get_valid(&self, year: i32) -> Option<&CacheEntry> {
        self.entry
            .as_ref()
            .filter(|entry| entry.year == year && !entry.is_expired())
    }

    /// Checks if a valid entry exists for `year`.
    pub fn is_valid(&self, year: i32) -> bool {
        self.get_valid(year).is_some()
    }

    /// Stores the holidays of `year`, replacing any previous entry.
    pub fn insert(&mut self, year: i32, holidays: Vec<HolidayEvent>) -> &CacheEntry {
        let count = holidays.len();
        let previous = self.entry.as_ref().map(|entry| entry.year);
        debug!(
            year,
            count,
            replaced_year = ?previous,
            ttl_secs = self.ttl.as_secs(),
            "Stored holidays in cache"
        );
        self.entry.insert(CacheEntry::new(year, holidays, self.ttl))
    }

    /// Discards the entry.
    pub fn clear(&mut self) {
        if let Some(entry) = self.entry.take() {
            debug!(year = entry.year, "Cleared holiday cache");
        }
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}

impl Default for HolidayCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(24 * 60 * 60))
    }
}
