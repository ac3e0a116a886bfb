//! Holiday lookup commands.
//!
//! Each command queries the [`HolidayService`] and renders the result as
//! terminal text or JSON. A missing API key or an unreachable API shows up
//! as "no holidays", never as a failed command.

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use tracing::warn;

use holidays_core::{HolidayEvent, OutputFormat, OutputFormatter, TimeZoneSpec};
use holidays_providers::google::GoogleHolidaySource;
use holidays_providers::{ErrorSource, HolidaySource};
use holidays_service::HolidayService;

use super::emit;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Builds the service described by `config`.
///
/// A Google source that cannot be built is replaced by one that always
/// fails, so lookups still run and come back empty.
pub fn build_service(config: &ClientConfig) -> ClientResult<HolidayService> {
    let service_config = config.service_config().map_err(ClientError::Config)?;

    let source: Arc<dyn HolidaySource> =
        match GoogleHolidaySource::new(config.google.to_provider_config()) {
            Ok(source) => Arc::new(source),
            Err(e) => {
                warn!(error = %e, "cannot build Google holiday source");
                Arc::new(ErrorSource::new("google", e))
            }
        };

    Ok(HolidayService::new(source, service_config))
}

/// The Sunday on or before `today`.
pub fn default_week_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(i64::from(today.weekday().num_days_from_sunday()))
}

/// Converts a 1-12 month number to the 0-based index the service uses.
pub fn month_index(month: u32) -> ClientResult<u32> {
    if (1..=12).contains(&month) {
        Ok(month - 1)
    } else {
        Err(ClientError::InvalidArgument(format!(
            "month must be between 1 and 12, got {}",
            month
        )))
    }
}

/// Renders holiday lists in the selected output format.
#[derive(Debug, Clone)]
pub struct Renderer {
    format: OutputFormat,
    formatter: OutputFormatter,
}

/// JSON shape of `holidays check`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckOutput<'a> {
    date: NaiveDate,
    is_holiday: bool,
    names: &'a [String],
}

impl Renderer {
    /// Creates a renderer using the display settings of `config`.
    pub fn new(format: OutputFormat, zone: TimeZoneSpec, config: &ClientConfig) -> Self {
        let formatter = OutputFormatter::new(zone)
            .with_no_holiday_text(&config.display.no_holiday_text)
            .with_descriptions(config.display.show_description);
        Self { format, formatter }
    }

    /// Renders a list of holidays.
    pub fn holidays(&self, holidays: &[HolidayEvent]) -> ClientResult<String> {
        match self.format {
            OutputFormat::Tty => Ok(self.formatter.format_tty(holidays)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(holidays)?),
        }
    }

    /// Renders holiday names.
    pub fn names(&self, names: &[String]) -> ClientResult<String> {
        match self.format {
            OutputFormat::Tty => Ok(self.formatter.format_names(names)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(names)?),
        }
    }

    /// Renders the answer to "is `date` a holiday?".
    pub fn check(&self, date: NaiveDate, names: &[String]) -> ClientResult<String> {
        match self.format {
            OutputFormat::Tty if names.is_empty() => Ok(format!("{} is not a holiday", date)),
            OutputFormat::Tty => Ok(format!("{} is a holiday: {}", date, names.join(", "))),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&CheckOutput {
                date,
                is_holiday: !names.is_empty(),
                names,
            })?),
        }
    }
}

/// `holidays day [DATE]`
pub async fn day(
    service: &HolidayService,
    renderer: &Renderer,
    date: NaiveDate,
) -> ClientResult<()> {
    let holidays = service.holidays_for_day(date).await;
    emit(&renderer.holidays(&holidays)?)
}

/// `holidays week [START]`
pub async fn week(
    service: &HolidayService,
    renderer: &Renderer,
    start: NaiveDate,
) -> ClientResult<()> {
    let holidays = service.holidays_for_week(start).await;
    emit(&renderer.holidays(&holidays)?)
}

/// `holidays month [YEAR MONTH]`, with MONTH in 1-12.
pub async fn month(
    service: &HolidayService,
    renderer: &Renderer,
    year: i32,
    month: u32,
) -> ClientResult<()> {
    let holidays = service.holidays_for_month(year, month_index(month)?).await;
    emit(&renderer.holidays(&holidays)?)
}

/// `holidays check [DATE]`
pub async fn check(
    service: &HolidayService,
    renderer: &Renderer,
    date: NaiveDate,
) -> ClientResult<()> {
    let names = service.holiday_names(date).await;
    emit(&renderer.check(date, &names)?)
}

/// `holidays names [DATE]`
pub async fn names(
    service: &HolidayService,
    renderer: &Renderer,
    date: NaiveDate,
) -> ClientResult<()> {
    let names = service.holiday_names(date).await;
    emit(&renderer.names(&names)?)
}
