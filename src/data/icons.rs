//! Provider condition code to display glyph mapping
//!
//! OpenWeatherMap icon codes are two digits plus a `d`/`n` day-night suffix.

/// Glyph used for any code not in the table
pub const DEFAULT_ICON: &str = "\u{1F324}\u{FE0F}"; // 🌤️

/// Map an OpenWeatherMap icon code (e.g. `"01d"`) to a display glyph
///
/// Total: unknown codes resolve to [`DEFAULT_ICON`].
pub fn resolve_icon(condition_code: &str) -> &'static str {
    match condition_code {
        "01d" => "\u{2600}\u{FE0F}",         // ☀️ clear sky
        "01n" => "\u{1F319}",                // 🌙
        "02d" => "\u{26C5}",                 // ⛅ few clouds
        "02n" => "\u{2601}\u{FE0F}",         // ☁️
        "03d" | "03n" => "\u{2601}\u{FE0F}", // ☁️ scattered clouds
        "04d" | "04n" => "\u{2601}\u{FE0F}", // ☁️ broken clouds
        "09d" | "09n" => "\u{1F327}\u{FE0F}", // 🌧️ shower rain
        "10d" => "\u{1F326}\u{FE0F}",        // 🌦️ rain
        "10n" => "\u{1F327}\u{FE0F}",        // 🌧️
        "11d" | "11n" => "\u{26C8}\u{FE0F}", // ⛈️ thunderstorm
        "13d" | "13n" => "\u{1F328}\u{FE0F}", // 🌨️ snow
        "50d" | "50n" => "\u{1F32B}\u{FE0F}", // 🌫️ mist
        _ => DEFAULT_ICON,
    }
}
