//! Synthetic OpenWeatherMap payloads shared by the integration tests

#![allow(dead_code)]

use serde_json::{json, Value};

/// 2024-07-15T00:00:00Z
pub const DAY_START: i64 = 1_721_001_600;

/// Seconds between forecast samples
pub const STEP: i64 = 3 * 3600;

pub fn item(dt: i64, temp: f64, icon: &str, description: &str) -> Value {
    json!({
        "dt": dt,
        "main": { "temp": temp, "feels_like": temp, "pressure": 1015, "humidity": 60 },
        "weather": [{ "id": 800, "main": "Clear", "description": description, "icon": icon }],
        "wind": { "speed": 3.1, "deg": 310 },
        "dt_txt": "2024-07-15 00:00:00"
    })
}

pub fn lisbon() -> Value {
    json!({
        "id": 2267057,
        "name": "Lisbon",
        "coord": { "lat": 38.7167, "lon": -9.1333 },
        "country": "PT",
        "timezone": 3600,
        "sunrise": 1721021532,
        "sunset": 1721073752
    })
}

/// Forty 3-hourly samples starting at `DAY_START`
///
/// The sample at 12:00 UTC each day is 20.4°C and clear; day `n` also gets a
/// warmer afternoon sample so a stride selection is distinguishable.
pub fn forty_samples() -> Vec<Value> {
    (0..40)
        .map(|i| {
            let dt = DAY_START + i * STEP;
            match i % 8 {
                4 => item(dt, 20.4 + (i / 8) as f64, "01d", "clear sky"),
                5 => item(dt, 25.0, "02d", "few clouds"),
                _ => item(dt, 14.6, "04n", "broken clouds"),
            }
        })
        .collect()
}

pub fn payload(items: Vec<Value>, city: Option<Value>) -> Value {
    let mut body = json!({ "cod": "200", "message": 0, "cnt": items.len(), "list": items });
    if let Some(city) = city {
        body["city"] = city;
    }
    body
}
