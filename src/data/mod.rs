//! Core data models for City Forecast
//!
//! Raw provider samples come in, display-ready daily records go out. Everything
//! the display layer reads lives in a [`ForecastSet`].

pub mod error;
pub mod gateway;
pub mod icons;
pub mod normalize;
pub mod selector;
pub mod time;
pub mod units;

pub use error::ForecastError;
pub use gateway::{GatewayConfig, OpenWeatherClient};
pub use icons::resolve_icon;
pub use normalize::{normalize, normalize_str, NormalizeOptions, RawPayload};
pub use selector::{select_daily, SelectorConfig, Timestamped};
pub use time::{format_date, LocaleTag, TimeZonePolicy};
pub use units::{to_celsius, to_fahrenheit, TemperatureUnit};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One provider-supplied timestamped observation, validated
#[derive(Debug, Clone, PartialEq)]
pub struct RawSample {
    /// Observation time
    pub observed_at: DateTime<Utc>,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Provider condition/icon code, e.g. `01d`
    pub condition_code: String,
    /// Human-readable condition, e.g. `clear sky`
    pub description: String,
}

impl RawSample {
    /// Seconds since the Unix epoch
    pub fn timestamp(&self) -> i64 {
        self.observed_at.timestamp()
    }
}

impl Timestamped for RawSample {
    fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }
}

/// Display-ready summary for one calendar day
///
/// Every field is derived once at normalization time. There are no setters;
/// unit conversion for display goes through [`TemperatureUnit::display_value`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyRecord {
    date: String,
    time: String,
    timestamp: i64,
    temperature_celsius: i32,
    description: String,
    icon: &'static str,
}

impl DailyRecord {
    pub fn new(
        date: String,
        time: String,
        timestamp: i64,
        temperature_celsius: i32,
        description: String,
        icon: &'static str,
    ) -> Self {
        Self {
            date,
            time,
            timestamp,
            temperature_celsius,
            description,
            icon,
        }
    }

    /// Locale-formatted date
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Locale-formatted clock time of the sample this day was taken from
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Provider timestamp of the selected sample (seconds since epoch)
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Temperature in whole degrees Celsius, rounded once from the raw value
    pub fn temperature_celsius(&self) -> i32 {
        self.temperature_celsius
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn icon(&self) -> &'static str {
        self.icon
    }
}

/// Coordinates and name of the forecast city
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

/// Ordered daily records for one query plus optional location
///
/// Order is chronological and meaningful: charts use insertion order as the
/// x axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSet {
    days: Vec<DailyRecord>,
    city: Option<CityLocation>,
}

impl ForecastSet {
    pub fn new(days: Vec<DailyRecord>, city: Option<CityLocation>) -> Self {
        Self { days, city }
    }

    pub fn days(&self) -> &[DailyRecord] {
        &self.days
    }

    pub fn city(&self) -> Option<&CityLocation> {
        self.city.as_ref()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Lowest and highest stored Celsius temperature, if any days exist
    pub fn temperature_range(&self) -> Option<(i32, i32)> {
        let temps = self.days.iter().map(DailyRecord::temperature_celsius);
        let min = temps.clone().min()?;
        let max = temps.max()?;
        Some((min, max))
    }
}
