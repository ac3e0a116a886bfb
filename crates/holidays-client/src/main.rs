//! holidays CLI entry point.

use std::process::ExitCode;

use chrono::Datelike;
use clap::Parser;

use holidays_client::cli::{Cli, Command, ConfigAction};
use holidays_client::commands::holidays::{self as lookup, Renderer};
use holidays_client::config::{ClientConfig, Overrides};
use holidays_client::error::{ClientError, ClientResult};
use holidays_core::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.tracing_config()) {
        eprintln!("warning: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let format = cli.output_format();
    let mut config = match cli.config {
        Some(ref path) => ClientConfig::load_from(path).map_err(ClientError::Config)?,
        None => ClientConfig::load().map_err(ClientError::Config)?,
    };
    config.apply_overrides(&Overrides {
        api_key: cli.api_key.clone(),
        calendar_id: cli.calendar_id.clone(),
        utc_offset: cli.utc_offset.clone(),
        show_description: cli.show_description,
    });

    let command = match cli.command {
        Some(Command::Config { action }) => {
            return match action {
                ConfigAction::Dump => holidays_client::commands::config::dump(&config),
                ConfigAction::Validate => holidays_client::commands::config::validate(&config),
                ConfigAction::Path => holidays_client::commands::config::path(),
            };
        }
        Some(command) => command,
        None => Command::Day { date: None },
    };

    let zone = config.zone().map_err(ClientError::Config)?;
    let today = zone.today();
    let renderer = Renderer::new(format, zone, &config);
    let service = lookup::build_service(&config)?;

    match command {
        Command::Day { date } => lookup::day(&service, &renderer, date.unwrap_or(today)).await,
        Command::Week { start } => {
            let start = start.unwrap_or_else(|| lookup::default_week_start(today));
            lookup::week(&service, &renderer, start).await
        }
        Command::Month { year, month } => {
            let year = year.unwrap_or_else(|| today.year());
            let month = month.unwrap_or_else(|| today.month());
            lookup::month(&service, &renderer, year, month).await
        }
        Command::Check { date } => lookup::check(&service, &renderer, date.unwrap_or(today)).await,
        Command::Names { date } => lookup::names(&service, &renderer, date.unwrap_or(today)).await,
        // handled above
        Command::Config { .. } => Ok(()),
    }
}
