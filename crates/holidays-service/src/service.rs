//! The holiday service: fetch a year, cache it, answer range queries.

use std::sync::Arc;

use chrono::NaiveDate;
use holidays_core::{DateRange, HolidayEvent, TimeZoneSpec, filter_by_range};
use holidays_providers::{
    FetchWindow, HolidaySource, ProviderError, ProviderResult, normalize_events,
};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::cache::HolidayCache;
use crate::config::ServiceConfig;

/// Serves holiday queries from a single-year cache backed by a
/// [`HolidaySource`].
///
/// Every query goes through [`fetch_holidays`](Self::fetch_holidays). A miss
/// fetches the whole year the requested range starts in; the year is then
/// reused until it expires or a different year is requested.
///
/// Failures never reach the caller: they are logged and turned into an
/// empty result, and the cache is left as it was.
///
/// The cache lock is held for the duration of a fetch, so concurrent misses
/// wait for the first fetch instead of issuing their own.
pub struct HolidayService {
    source: Arc<dyn HolidaySource>,
    cache: Mutex<HolidayCache>,
    zone: TimeZoneSpec,
}

impl HolidayService {
    /// Creates a service with an empty cache.
    pub fn new(source: Arc<dyn HolidaySource>, config: ServiceConfig) -> Self {
        Self {
            source,
            cache: Mutex::new(HolidayCache::new(config.cache_ttl)),
            zone: config.zone,
        }
    }

    /// The zone day, week and month boundaries are interpreted in.
    pub fn zone(&self) -> &TimeZoneSpec {
        &self.zone
    }

    /// Holidays starting on `date`.
    pub async fn holidays_for_day(&self, date: NaiveDate) -> Vec<HolidayEvent> {
        self.fetch_holidays(DateRange::for_day(date)).await
    }

    /// Holidays starting in the seven days from `start_of_week`.
    pub async fn holidays_for_week(&self, start_of_week: NaiveDate) -> Vec<HolidayEvent> {
        match DateRange::for_week(start_of_week) {
            Some(range) => self.fetch_holidays(range).await,
            None => {
                warn!(%start_of_week, "week runs past the last representable date");
                Vec::new()
            }
        }
    }

    /// Holidays starting in a month. `month_index` is 0-based.
    ///
    /// An index outside `0..=11` yields an empty list.
    pub async fn holidays_for_month(&self, year: i32, month_index: u32) -> Vec<HolidayEvent> {
        match DateRange::for_month(year, month_index) {
            Some(range) => self.fetch_holidays(range).await,
            None => {
                warn!(year, month_index, "invalid month, expected an index in 0..=11");
                Vec::new()
            }
        }
    }

    /// Returns true if at least one holiday starts on `date`.
    pub async fn is_holiday(&self, date: NaiveDate) -> bool {
        !self.holidays_for_day(date).await.is_empty()
    }

    /// Titles of the holidays starting on `date`.
    pub async fn holiday_names(&self, date: NaiveDate) -> Vec<String> {
        self.holidays_for_day(date)
            .await
            .into_iter()
            .map(|h| h.title)
            .collect()
    }

    /// Discards the cached year. The next query fetches again.
    pub async fn clear_cache(&self) {
        self.cache.lock().await.clear();
    }

    /// Loads (or reuses) the cached holidays of `year` and returns all of them.
    pub async fn load_year(&self, year: i32) -> Vec<HolidayEvent> {
        match DateRange::for_year(year) {
            Some(range) => self.fetch_holidays(range).await,
            None => {
                warn!(year, "year out of range");
                Vec::new()
            }
        }
    }

    /// Returns the holidays whose start lies within `range`.
    ///
    /// Served from the cache when it holds the year `range` starts in;
    /// otherwise that whole year is fetched and cached first.
    pub async fn fetch_holidays(&self, range: DateRange) -> Vec<HolidayEvent> {
        let year = range.year();
        let mut cache = self.cache.lock().await;

        if let Some(entry) = cache.get_valid(year) {
            debug!(
                year,
                %range,
                expires_in_secs = entry.time_until_expiry().map(|d| d.as_secs()),
                "holiday cache hit"
            );
            return filter_by_range(&entry.holidays, &range, &self.zone);
        }

        debug!(year, %range, "holiday cache miss");

        match self.fetch_year(year).await {
            Ok(holidays) => {
                info!(
                    year,
                    count = holidays.len(),
                    source = self.source.name(),
                    "fetched holidays"
                );
                let entry = cache.insert(year, holidays);
                filter_by_range(&entry.holidays, &range, &self.zone)
            }
            Err(e) if e.is_configuration() => {
                warn!(error = %e, "holiday source is not configured");
                Vec::new()
            }
            Err(e) => {
                error!(
                    year,
                    error = %e,
                    retryable = e.is_retryable(),
                    "failed to fetch holidays"
                );
                Vec::new()
            }
        }
    }

    async fn fetch_year(&self, year: i32) -> ProviderResult<Vec<HolidayEvent>> {
        let year_range = DateRange::for_year(year)
            .ok_or_else(|| ProviderError::internal(format!("year {year} out of range")))?;
        let (time_min, time_max) = year_range.to_utc(&self.zone);
        let raw_events = self
            .source
            .fetch_events(FetchWindow::new(time_min, time_max))
            .await?;
        Ok(normalize_events(&raw_events))
    }
}

impl std::fmt::Debug for HolidayService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HolidayService")
            .field("source", &self.source.name())
            .field("zone", &self.zone)
            .finish_non_exhaustive()
    }
}
