//! Forecast normalization
//!
//! Turns an OpenWeatherMap `/forecast` payload into a [`ForecastSet`]: one
//! display-ready record per day, plus the city's coordinates when present.
//! Missing or mistyped fields surface as [`ForecastError::MalformedPayload`],
//! never as partially filled records.

use chrono::FixedOffset;
use serde::Deserialize;

use super::error::ForecastError;
use super::icons::resolve_icon;
use super::selector::{select_daily, SelectorConfig};
use super::time::{format_date, format_time, from_epoch_seconds, LocaleTag, TimeZonePolicy};
use super::{CityLocation, DailyRecord, ForecastSet, RawSample};

/// Options controlling how a payload is normalized
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub locale: LocaleTag,
    pub timezone: TimeZonePolicy,
    pub selector: SelectorConfig,
}

/// OpenWeatherMap `/forecast` response, as loosely as it can arrive
///
/// Fields are optional so that absence can be reported precisely by
/// [`RawPayload::samples`] instead of as a generic deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPayload {
    pub list: Option<Vec<RawItem>>,
    pub city: Option<RawCity>,
}

/// One 3-hourly entry of `list`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawItem {
    pub dt: Option<i64>,
    pub main: Option<RawMain>,
    #[serde(default)]
    pub weather: Vec<RawCondition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMain {
    pub temp: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCondition {
    pub icon: Option<String>,
    pub description: Option<String>,
}

/// The `city` block
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCity {
    pub name: Option<String>,
    pub coord: Option<RawCoord>,
    /// Shift in seconds from UTC
    pub timezone: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCoord {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl RawPayload {
    /// Parse a JSON document
    pub fn from_json(json: &str) -> Result<Self, ForecastError> {
        serde_json::from_str(json)
            .map_err(|e| ForecastError::malformed(format!("invalid forecast JSON: {}", e)))
    }

    /// Validate every entry of `list` into a [`RawSample`]
    pub fn samples(&self) -> Result<Vec<RawSample>, ForecastError> {
        let list = self
            .list
            .as_ref()
            .ok_or_else(|| ForecastError::malformed("list"))?;

        list.iter()
            .enumerate()
            .map(|(i, item)| item.to_sample(i))
            .collect()
    }

    /// UTC shift of the queried city, if the provider sent one
    pub fn city_offset_seconds(&self) -> Option<i32> {
        self.city.as_ref().and_then(|c| c.timezone)
    }

    /// City location when the `city` block carries coordinates
    pub fn city_location(&self) -> Option<CityLocation> {
        let city = self.city.as_ref()?;
        let coord = city.coord.as_ref()?;
        let (latitude, longitude) = match (coord.lat, coord.lon) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                tracing::debug!("city block has incomplete coordinates, ignoring it");
                return None;
            }
        };
        Some(CityLocation {
            latitude,
            longitude,
            display_name: city.name.clone().unwrap_or_default(),
        })
    }
}

impl RawItem {
    fn to_sample(&self, index: usize) -> Result<RawSample, ForecastError> {
        let field = |name: &str| ForecastError::malformed(format!("list[{}].{}", index, name));

        let dt = self.dt.ok_or_else(|| field("dt"))?;
        let observed_at = from_epoch_seconds(dt).ok_or_else(|| field("dt"))?;
        let temperature = self
            .main
            .as_ref()
            .and_then(|m| m.temp)
            .ok_or_else(|| field("main.temp"))?;
        let condition = self.weather.first().ok_or_else(|| field("weather[0]"))?;
        let condition_code = condition
            .icon
            .clone()
            .ok_or_else(|| field("weather[0].icon"))?;
        let description = condition
            .description
            .clone()
            .ok_or_else(|| field("weather[0].description"))?;

        Ok(RawSample {
            observed_at,
            temperature,
            condition_code,
            description,
        })
    }
}

/// Normalize a payload into five (or fewer) daily records
pub fn normalize(
    payload: &RawPayload,
    options: &NormalizeOptions,
) -> Result<ForecastSet, ForecastError> {
    let samples = payload.samples()?;
    let offset = options.timezone.resolve(payload.city_offset_seconds());

    let days: Vec<DailyRecord> = select_daily(&samples, &offset, &options.selector)
        .into_iter()
        .map(|sample| to_daily_record(sample, options.locale, offset))
        .collect();

    tracing::debug!(
        samples = samples.len(),
        days = days.len(),
        offset = %offset,
        "normalized forecast payload"
    );

    Ok(ForecastSet::new(days, payload.city_location()))
}

/// Parse and normalize a JSON document in one step
pub fn normalize_str(json: &str, options: &NormalizeOptions) -> Result<ForecastSet, ForecastError> {
    normalize(&RawPayload::from_json(json)?, options)
}

fn to_daily_record(sample: &RawSample, locale: LocaleTag, offset: FixedOffset) -> DailyRecord {
    DailyRecord::new(
        format_date(sample.observed_at, locale, offset),
        format_time(sample.observed_at, locale, offset),
        sample.timestamp(),
        sample.temperature.round() as i32,
        sample.description.clone(),
        resolve_icon(&sample.condition_code),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    /// 2024-07-15T00:00:00Z
    const DAY_START: i64 = 1_721_001_600;

    fn item(dt: i64, temp: f64, icon: &str, description: &str) -> Value {
        json!({
            "dt": dt,
            "main": { "temp": temp, "feels_like": temp, "humidity": 60 },
            "weather": [{ "id": 800, "main": "Clear", "description": description, "icon": icon }],
            "dt_txt": "ignored"
        })
    }

    fn payload(items: Vec<Value>, city: Option<Value>) -> String {
        let mut body = json!({ "cod": "200", "message": 0, "cnt": items.len(), "list": items });
        if let Some(city) = city {
            body["city"] = city;
        }
        body.to_string()
    }

    fn lisbon() -> Value {
        json!({
            "id": 2267057,
            "name": "Lisbon",
            "coord": { "lat": 38.7167, "lon": -9.1333 },
            "country": "PT",
            "timezone": 3600
        })
    }

    fn five_days() -> Vec<Value> {
        (0..40)
            .map(|i| {
                let dt = DAY_START + i * 3 * 3600;
                if i % 8 == 4 {
                    item(dt, 20.4, "01d", "clear sky")
                } else {
                    item(dt, 14.6, "04n", "broken clouds")
                }
            })
            .collect()
    }

    fn utc_options() -> NormalizeOptions {
        NormalizeOptions {
            timezone: TimeZonePolicy::Utc,
            ..NormalizeOptions::default()
        }
    }

    #[test]
    fn test_normalize_picks_noon_records() {
        let set = normalize_str(&payload(five_days(), Some(lisbon())), &utc_options())
            .expect("Failed to normalize");

        assert_eq!(set.len(), 5);
        for day in set.days() {
            assert_eq!(day.temperature_celsius(), 20);
            assert_eq!(day.icon(), resolve_icon("01d"));
            assert_eq!(day.description(), "clear sky");
            assert_eq!(day.time(), "12:00");
        }
        assert_eq!(set.days()[0].date(), "15/07/2024");
        assert_eq!(set.days()[4].date(), "19/07/2024");
    }

    #[test]
    fn test_normalize_extracts_city() {
        let set = normalize_str(&payload(five_days(), Some(lisbon())), &utc_options())
            .expect("Failed to normalize");

        let city = set.city().expect("city should be present");
        assert_eq!(city.display_name, "Lisbon");
        assert!((city.latitude - 38.7167).abs() < 1e-9);
        assert!((city.longitude - (-9.1333)).abs() < 1e-9);
    }

    #[test]
    fn test_missing_city_block_is_not_an_error() {
        let set = normalize_str(&payload(five_days(), None), &utc_options())
            .expect("Failed to normalize");
        assert!(set.city().is_none());
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn test_city_without_coordinates_is_dropped() {
        let city = json!({ "name": "Nowhere", "coord": { "lat": 1.0 } });
        let set = normalize_str(&payload(five_days(), Some(city)), &utc_options())
            .expect("Failed to normalize");
        assert!(set.city().is_none());
    }

    #[test]
    fn test_missing_list_is_malformed() {
        let result = normalize_str(r#"{"city": {"name": "Lisbon"}}"#, &utc_options());
        match result {
            Err(ForecastError::MalformedPayload(detail)) => assert_eq!(detail, "list"),
            other => panic!("Expected MalformedPayload, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_item_fields_are_malformed() {
        let cases = [
            (json!({ "main": { "temp": 1.0 }, "weather": [{ "icon": "01d", "description": "x" }] }), "list[0].dt"),
            (json!({ "dt": DAY_START, "weather": [{ "icon": "01d", "description": "x" }] }), "list[0].main.temp"),
            (json!({ "dt": DAY_START, "main": {}, "weather": [{ "icon": "01d", "description": "x" }] }), "list[0].main.temp"),
            (json!({ "dt": DAY_START, "main": { "temp": 1.0 } }), "list[0].weather[0]"),
            (json!({ "dt": DAY_START, "main": { "temp": 1.0 }, "weather": [] }), "list[0].weather[0]"),
            (json!({ "dt": DAY_START, "main": { "temp": 1.0 }, "weather": [{ "description": "x" }] }), "list[0].weather[0].icon"),
        ];

        for (entry, expected) in cases {
            let result = normalize_str(&payload(vec![entry], None), &utc_options());
            match result {
                Err(ForecastError::MalformedPayload(detail)) => assert_eq!(detail, expected),
                other => panic!("Expected MalformedPayload({}), got {:?}", expected, other),
            }
        }
    }

    #[test]
    fn test_mistyped_field_is_malformed() {
        let body = r#"{"list": [{"dt": "yesterday", "main": {"temp": 1.0}, "weather": []}]}"#;
        assert!(matches!(
            normalize_str(body, &utc_options()),
            Err(ForecastError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        assert!(matches!(
            normalize_str("{ invalid json }", &utc_options()),
            Err(ForecastError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_empty_list_gives_empty_set() {
        let set = normalize_str(&payload(Vec::new(), Some(lisbon())), &utc_options())
            .expect("Failed to normalize");
        assert!(set.is_empty());
        assert!(set.city().is_some());
    }

    #[test]
    fn test_temperature_rounds_half_away_from_zero() {
        let items = vec![
            item(DAY_START + 12 * 3600, 20.5, "01d", "a"),
            item(DAY_START + 36 * 3600, -2.5, "01d", "b"),
            item(DAY_START + 60 * 3600, 19.49, "01d", "c"),
        ];
        let options = NormalizeOptions {
            selector: SelectorConfig {
                days: 3,
                ..SelectorConfig::default()
            },
            ..utc_options()
        };
        let set = normalize_str(&payload(items, None), &options).expect("Failed to normalize");

        let temps: Vec<i32> = set.days().iter().map(|d| d.temperature_celsius()).collect();
        assert_eq!(temps, vec![21, -3, 19]);
    }

    #[test]
    fn test_city_policy_uses_city_offset_for_dates() {
        // 23:00 UTC on the 15th is the 16th in UTC+3
        let items = vec![item(DAY_START + 23 * 3600, 10.0, "01n", "clear sky")];
        let city = json!({ "name": "Moscow", "coord": { "lat": 55.75, "lon": 37.62 }, "timezone": 10800 });
        let options = NormalizeOptions {
            locale: LocaleTag::Iso,
            timezone: TimeZonePolicy::City,
            ..NormalizeOptions::default()
        };
        let set = normalize_str(&payload(items, Some(city)), &options).expect("Failed to normalize");

        assert_eq!(set.days()[0].date(), "2024-07-16");
        assert_eq!(set.days()[0].time(), "02:00");
    }

    #[test]
    fn test_unknown_icon_code_uses_default_glyph() {
        let items = vec![item(DAY_START + 12 * 3600, 10.0, "99z", "odd")];
        let set = normalize_str(&payload(items, None), &utc_options())
            .expect("Failed to normalize");
        assert_eq!(set.days()[0].icon(), crate::data::icons::DEFAULT_ICON);
    }
}
