//! Non-interactive output: plain text and JSON reports of a forecast
//!
//! Temperatures are converted for display here; the stored Celsius values in
//! the [`ForecastSet`] are never modified.

use serde::Serialize;

use crate::data::{CityLocation, DailyRecord, ForecastSet, TemperatureUnit};

/// Block characters for temperature visualization (8 levels)
const TEMP_BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Converts a temperature into a block character relative to a range
fn temperature_to_block(value: i32, min: i32, max: i32) -> char {
    if max <= min {
        return TEMP_BLOCKS[3];
    }
    let normalized = (f64::from(value - min) / f64::from(max - min)).clamp(0.0, 1.0);
    let index = ((normalized * 7.0).round() as usize).min(7);
    TEMP_BLOCKS[index]
}

/// One-line sparkline of the daily temperatures in display units
pub fn temperature_sparkline(forecast: &ForecastSet, unit: TemperatureUnit) -> String {
    let values: Vec<i32> = forecast
        .days()
        .iter()
        .map(|d| unit.display_value(d.temperature_celsius()))
        .collect();
    let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
        return String::new();
    };
    values
        .iter()
        .map(|v| temperature_to_block(*v, min, max))
        .collect()
}

/// Title line for a forecast, preferring the provider's city name
pub fn forecast_title(forecast: &ForecastSet, query: &str) -> String {
    let name = forecast
        .city()
        .map(|c| c.display_name.as_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(query);
    format!("{}-Day Forecast for {}", forecast.len(), name)
}

/// Human-readable coordinates, e.g. `38.7167°N, 9.1333°W`
pub fn format_coordinates(city: &CityLocation) -> String {
    let ns = if city.latitude >= 0.0 { 'N' } else { 'S' };
    let ew = if city.longitude >= 0.0 { 'E' } else { 'W' };
    format!(
        "{:.4}°{}, {:.4}°{}",
        city.latitude.abs(),
        ns,
        city.longitude.abs(),
        ew
    )
}

/// Renders the text report printed by `--plain`
pub fn render_plain(forecast: &ForecastSet, query: &str, unit: TemperatureUnit) -> String {
    if forecast.is_empty() {
        return format!("No forecast data available for {}\n", query);
    }

    let mut out = forecast_title(forecast, query);
    if let Some(city) = forecast.city() {
        out.push_str(&format!(" ({})", format_coordinates(city)));
    }
    out.push('\n');

    let date_width = forecast
        .days()
        .iter()
        .map(|d| d.date().chars().count())
        .max()
        .unwrap_or(0);

    for day in forecast.days() {
        out.push_str(&format!(
            "{:<width$}  {}  {:>5}  {}\n",
            day.date(),
            day.icon(),
            unit.format(day.temperature_celsius()),
            day.description(),
            width = date_width
        ));
    }

    out.push_str(&format!(
        "Temperature ({}): {}\n",
        unit.symbol(),
        temperature_sparkline(forecast, unit)
    ));
    out
}

#[derive(Serialize)]
struct JsonDay<'a> {
    #[serde(flatten)]
    record: &'a DailyRecord,
    /// Temperature in the requested display unit
    temperature: i32,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    query: &'a str,
    unit: TemperatureUnit,
    city: Option<&'a CityLocation>,
    days: Vec<JsonDay<'a>>,
}

/// Renders the JSON document printed by `--json`
pub fn render_json(
    forecast: &ForecastSet,
    query: &str,
    unit: TemperatureUnit,
) -> Result<String, serde_json::Error> {
    let report = JsonReport {
        query,
        unit,
        city: forecast.city(),
        days: forecast
            .days()
            .iter()
            .map(|record| JsonDay {
                record,
                temperature: unit.display_value(record.temperature_celsius()),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::resolve_icon;

    fn day(date: &str, temp: i32, code: &str, description: &str) -> DailyRecord {
        DailyRecord::new(
            date.to_string(),
            "12:00".to_string(),
            0,
            temp,
            description.to_string(),
            resolve_icon(code),
        )
    }

    fn sample_forecast() -> ForecastSet {
        ForecastSet::new(
            vec![
                day("15/07/2024", 20, "01d", "clear sky"),
                day("16/07/2024", 24, "02d", "few clouds"),
                day("17/07/2024", 27, "01d", "clear sky"),
                day("18/07/2024", 22, "10d", "light rain"),
                day("19/07/2024", 20, "04d", "broken clouds"),
            ],
            Some(CityLocation {
                latitude: 38.7167,
                longitude: -9.1333,
                display_name: "Lisbon".to_string(),
            }),
        )
    }

    #[test]
    fn test_block_extremes() {
        assert_eq!(temperature_to_block(0, 0, 10), '▁');
        assert_eq!(temperature_to_block(10, 0, 10), '█');
        // Flat series sits mid-height
        assert_eq!(temperature_to_block(5, 5, 5), '▄');
    }

    #[test]
    fn test_sparkline_tracks_shape() {
        let line = temperature_sparkline(&sample_forecast(), TemperatureUnit::Celsius);
        let chars: Vec<char> = line.chars().collect();
        assert_eq!(chars.len(), 5);
        assert_eq!(chars[0], '▁');
        assert_eq!(chars[2], '█');
        assert_eq!(chars[4], '▁');
    }

    #[test]
    fn test_sparkline_empty() {
        let empty = ForecastSet::new(Vec::new(), None);
        assert_eq!(temperature_sparkline(&empty, TemperatureUnit::Celsius), "");
    }

    #[test]
    fn test_title_prefers_provider_name() {
        assert_eq!(
            forecast_title(&sample_forecast(), "lisboa"),
            "5-Day Forecast for Lisbon"
        );
        let nameless = ForecastSet::new(vec![day("a", 1, "01d", "x")], None);
        assert_eq!(forecast_title(&nameless, "lisboa"), "1-Day Forecast for lisboa");
    }

    #[test]
    fn test_format_coordinates_hemispheres() {
        let city = CityLocation {
            latitude: -33.8688,
            longitude: 151.2093,
            display_name: "Sydney".to_string(),
        };
        assert_eq!(format_coordinates(&city), "33.8688°S, 151.2093°E");
    }

    #[test]
    fn test_plain_report_celsius() {
        let text = render_plain(&sample_forecast(), "lisboa", TemperatureUnit::Celsius);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "5-Day Forecast for Lisbon (38.7167°N, 9.1333°W)");
        assert!(lines[1].starts_with("15/07/2024"));
        assert!(lines[1].contains("20°C"));
        assert!(lines[1].ends_with("clear sky"));
        assert!(lines[6].starts_with("Temperature (°C): "));
    }

    #[test]
    fn test_plain_report_fahrenheit_converts_at_render_time() {
        let forecast = sample_forecast();
        let text = render_plain(&forecast, "lisboa", TemperatureUnit::Fahrenheit);

        assert!(text.contains("68°F"));
        assert!(text.contains("81°F")); // 27°C = 80.6°F
        assert_eq!(forecast.days()[2].temperature_celsius(), 27);
    }

    #[test]
    fn test_plain_report_empty() {
        let empty = ForecastSet::new(Vec::new(), None);
        assert_eq!(
            render_plain(&empty, "Nowhere", TemperatureUnit::Celsius),
            "No forecast data available for Nowhere\n"
        );
    }

    #[test]
    fn test_json_report() {
        let json = render_json(&sample_forecast(), "lisboa", TemperatureUnit::Fahrenheit)
            .expect("Failed to render JSON");
        let value: serde_json::Value = serde_json::from_str(&json).expect("Invalid JSON");

        assert_eq!(value["query"], "lisboa");
        assert_eq!(value["unit"], "fahrenheit");
        assert_eq!(value["city"]["display_name"], "Lisbon");
        assert_eq!(value["days"].as_array().map(Vec::len), Some(5));
        assert_eq!(value["days"][0]["temperature_celsius"], 20);
        assert_eq!(value["days"][0]["temperature"], 68);
        assert_eq!(value["days"][0]["date"], "15/07/2024");
    }
}
