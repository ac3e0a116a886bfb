//! Command-line interface definition.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use holidays_core::{OutputFormat, TracingConfig, TracingOutputFormat};

/// holidays - Public holidays from a Google calendar
#[derive(Debug, Parser)]
#[command(name = "holidays")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "HOLIDAYS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Log format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Log filter directive, overriding RUST_LOG (e.g. "holidays_service=trace")
    #[arg(long)]
    pub log_filter: Option<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    // --- Source flags ---
    /// Google Calendar API key
    #[arg(long, env = "GOOGLE_CALENDAR_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Calendar to read holidays from
    #[arg(long, env = "INDIAN_HOLIDAYS_CALENDAR_ID")]
    pub calendar_id: Option<String>,

    // --- Display options ---
    /// UTC offset to interpret dates in (e.g. "+05:30", "utc", "local")
    #[arg(long)]
    pub utc_offset: Option<String>,

    /// Show holiday descriptions
    #[arg(long)]
    pub show_description: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Returns the output format based on CLI flags.
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Tty
        }
    }

    /// Returns the tracing setup based on CLI flags.
    pub fn tracing_config(&self) -> TracingConfig {
        let config = if self.debug {
            TracingConfig::cli_debug()
        } else {
            TracingConfig::cli()
        }
        .with_format(self.log_format.into());

        match self.log_filter {
            Some(ref filter) => config.with_env_filter(filter),
            None => config,
        }
    }
}

/// Log output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl From<LogFormat> for TracingOutputFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Compact => Self::Compact,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Json => Self::Json,
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Holidays on a day (default: today)
    Day {
        /// Date as YYYY-MM-DD
        date: Option<NaiveDate>,
    },

    /// Holidays in the seven days from START (default: this week's Sunday)
    Week {
        /// First day of the week as YYYY-MM-DD
        start: Option<NaiveDate>,
    },

    /// Holidays in a month (default: the current month)
    Month {
        /// Year, e.g. 2024
        #[arg(requires = "month")]
        year: Option<i32>,

        /// Month number, 1-12
        #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },

    /// Tell whether a day is a holiday
    Check {
        /// Date as YYYY-MM-DD
        date: Option<NaiveDate>,
    },

    /// Holiday names on a day, one per line
    Names {
        /// Date as YYYY-MM-DD
        date: Option<NaiveDate>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump the effective configuration (API key redacted)
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
