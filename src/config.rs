//! Layered runtime settings
//!
//! Settings are resolved once at startup. Precedence, highest first:
//! command-line flag, environment variable (via clap), config file, default.
//! The config file is TOML and lives in the platform config directory
//! (`~/.config/cityforecast/config.toml` on Linux).

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::Cli;
use crate::data::gateway::{GatewayConfig, DEFAULT_TIMEOUT, OPENWEATHER_BASE_URL};
use crate::data::{LocaleTag, NormalizeOptions, SelectorConfig, TemperatureUnit, TimeZonePolicy};

/// Errors that can occur while loading settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file is not valid TOML for our schema
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A setting has a value we cannot interpret
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },
}

/// On-disk config file contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub unit: Option<String>,
    pub locale: Option<String>,
    pub timezone: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Reads a config file
    ///
    /// A missing file yields the defaults only when `required` is false.
    pub fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !required => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub unit: TemperatureUnit,
    pub locale: LocaleTag,
    pub timezone: TimeZonePolicy,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: OPENWEATHER_BASE_URL.to_string(),
            unit: TemperatureUnit::default(),
            locale: LocaleTag::default(),
            timezone: TimeZonePolicy::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Default config file location, if a home directory can be determined
pub fn default_config_path() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "cityforecast")?;
    Some(project_dirs.config_dir().join("config.toml"))
}

impl Settings {
    /// Loads the config file named on the command line (or the default one)
    /// and layers the command-line values on top
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match (&cli.config, default_config_path()) {
            (Some(path), _) => FileConfig::load(path, true)?,
            (None, Some(path)) => FileConfig::load(&path, false)?,
            (None, None) => FileConfig::default(),
        };
        Self::resolve(cli, &file)
    }

    /// Merges command-line values over file values over defaults
    pub fn resolve(cli: &Cli, file: &FileConfig) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let unit = match cli.unit.as_deref().or(file.unit.as_deref()) {
            Some(raw) => parse_field("unit", raw)?,
            None => defaults.unit,
        };
        let locale = match cli.locale.as_deref().or(file.locale.as_deref()) {
            Some(raw) => parse_field("locale", raw)?,
            None => defaults.locale,
        };
        let timezone = match cli.timezone.as_deref().or(file.timezone.as_deref()) {
            Some(raw) => parse_field("timezone", raw)?,
            None => defaults.timezone,
        };
        let timeout = match cli.timeout.or(file.timeout_secs) {
            Some(0) => {
                return Err(ConfigError::InvalidValue {
                    field: "timeout",
                    message: "must be at least 1 second".to_string(),
                })
            }
            Some(secs) => Duration::from_secs(secs),
            None => defaults.timeout,
        };

        Ok(Self {
            api_key: cli.api_key.clone().or_else(|| file.api_key.clone()),
            base_url: cli
                .base_url
                .clone()
                .or_else(|| file.base_url.clone())
                .unwrap_or(defaults.base_url),
            unit,
            locale,
            timezone,
            timeout,
        })
    }

    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            timeout: self.timeout,
        }
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            locale: self.locale,
            timezone: self.timezone,
            selector: SelectorConfig::default(),
        }
    }
}

fn parse_field<T>(field: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = String>,
{
    raw.parse()
        .map_err(|message| ConfigError::InvalidValue { field, message })
}
