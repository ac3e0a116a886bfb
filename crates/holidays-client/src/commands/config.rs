//! Configuration commands.

use super::emit;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Dump the effective configuration to stdout, API key redacted.
pub fn dump(config: &ClientConfig) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(&config.redacted())
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    emit(&format!(
        "# config.toml ({})\n{}",
        ClientConfig::default_path().display(),
        toml_str
    ))
}

/// Validate the configuration.
pub fn validate(config: &ClientConfig) -> ClientResult<()> {
    let problems = config.problems();
    if !problems.is_empty() {
        return Err(ClientError::Config(problems.join("; ")));
    }

    if config.google.api_key.is_none() {
        emit(
            "warning: no API key configured; set GOOGLE_CALENDAR_API_KEY or [google].api_key. \
             No holidays will be shown.",
        )?;
    }

    emit("Configuration is valid.")
}

/// Show the configuration file path.
pub fn path() -> ClientResult<()> {
    let config_path = ClientConfig::default_path();
    emit(&format!("config: {}", config_path.display()))
}
