//! Command-line interface parsing for City Forecast
//!
//! Handles the optional startup city, output mode flags, and the settings
//! overrides that sit on top of the config file.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

/// Error types for CLI argument handling
#[derive(Debug, Error)]
pub enum CliError {
    /// Non-interactive modes need a city up front
    #[error("A city name is required with --plain or --json")]
    MissingCity,

    /// The city argument was empty after trimming
    #[error("City name must not be empty")]
    EmptyCity,
}

/// City Forecast - 5-day weather forecast lookup by city name
#[derive(Parser, Debug)]
#[command(name = "cityforecast")]
#[command(about = "5-day weather forecast lookup by city name")]
#[command(version)]
pub struct Cli {
    /// City to look up (required with --plain or --json)
    ///
    /// Examples:
    ///   cityforecast                    # Open the interactive search
    ///   cityforecast Lisbon             # Open with Lisbon already loaded
    ///   cityforecast --plain "New York" # Print the forecast and exit
    #[arg(value_name = "CITY")]
    pub city: Option<String>,

    /// Temperature unit: celsius (c) or fahrenheit (f)
    #[arg(short, long, value_name = "UNIT")]
    pub unit: Option<String>,

    /// Date locale: pt-PT, en-US, en-GB, de-DE, fr-FR or iso
    #[arg(long, value_name = "LOCALE")]
    pub locale: Option<String>,

    /// Timezone used for calendar days: city, utc, local or an offset like +02:00
    #[arg(long, value_name = "POLICY")]
    pub timezone: Option<String>,

    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// OpenWeatherMap API base URL
    #[arg(long, env = "OPENWEATHER_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to a TOML config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the forecast as text and exit
    #[arg(long, conflicts_with = "json")]
    pub plain: bool,

    /// Print the forecast as JSON and exit
    #[arg(long)]
    pub json: bool,
}

/// How results are presented
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Full-screen search UI, optionally with a city to load first
    Interactive { initial_city: Option<String> },
    /// Text report on stdout
    Plain { city: String },
    /// JSON document on stdout
    Json { city: String },
}

impl OutputMode {
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Interactive { .. })
    }
}

/// Trims a city argument, rejecting blank input
pub fn parse_city_arg(s: &str) -> Result<String, CliError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(CliError::EmptyCity);
    }
    Ok(trimmed.to_string())
}

impl Cli {
    /// Determine the output mode from parsed arguments
    ///
    /// # Returns
    /// * `Ok(OutputMode)` for a consistent set of flags
    /// * `Err(CliError)` if a non-interactive mode lacks a usable city
    pub fn output_mode(&self) -> Result<OutputMode, CliError> {
        let city = self.city.as_deref().map(parse_city_arg).transpose()?;

        if self.plain || self.json {
            let city = city.ok_or(CliError::MissingCity)?;
            return Ok(if self.json {
                OutputMode::Json { city }
            } else {
                OutputMode::Plain { city }
            });
        }

        Ok(OutputMode::Interactive { initial_city: city })
    }
}
