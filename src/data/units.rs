//! Temperature unit conversion
//!
//! Conversions round half away from zero (`f64::round`). For integer inputs
//! neither direction can produce an exact `.5`, so ties never arise here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Convert whole degrees Celsius to whole degrees Fahrenheit
pub fn to_fahrenheit(celsius: i32) -> i32 {
    (f64::from(celsius) * 9.0 / 5.0 + 32.0).round() as i32
}

/// Convert whole degrees Fahrenheit to whole degrees Celsius
pub fn to_celsius(fahrenheit: i32) -> i32 {
    ((f64::from(fahrenheit) - 32.0) * 5.0 / 9.0).round() as i32
}

/// Unit a temperature is displayed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Derive the display value from a stored Celsius base value
    ///
    /// The base value is already rounded; only the converted result is rounded.
    pub fn display_value(self, celsius: i32) -> i32 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => to_fahrenheit(celsius),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }

    /// Format a stored Celsius value for display, e.g. `68°F`
    pub fn format(self, celsius: i32) -> String {
        format!("{}{}", self.display_value(celsius), self.symbol())
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Celsius => write!(f, "celsius"),
            Self::Fahrenheit => write!(f, "fahrenheit"),
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "c" | "celsius" | "metric" => Ok(Self::Celsius),
            "f" | "fahrenheit" | "imperial" => Ok(Self::Fahrenheit),
            other => Err(format!(
                "unknown unit '{}', expected celsius (c) or fahrenheit (f)",
                other
            )),
        }
    }
}
