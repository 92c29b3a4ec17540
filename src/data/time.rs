//! Timestamp formatting and the timezone policy used to interpret timestamps
//!
//! Nothing here reads the machine's timezone implicitly. Callers pick a
//! [`TimeZonePolicy`], resolve it once into a [`FixedOffset`], and pass that
//! offset to both the formatter and the daily-sample selector.

use chrono::{DateTime, FixedOffset, Local, Offset, Utc};
use std::fmt;
use std::str::FromStr;

/// Locale used for display dates and times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocaleTag {
    /// Portuguese (Portugal): `15/07/2024`
    #[default]
    PtPt,
    /// English (US): `7/15/2024`
    EnUs,
    /// English (UK): `15/07/2024`
    EnGb,
    /// German: `15.07.2024`
    DeDe,
    /// French: `15/07/2024`
    FrFr,
    /// ISO 8601: `2024-07-15`
    Iso,
}

impl LocaleTag {
    fn date_pattern(self) -> &'static str {
        match self {
            Self::PtPt | Self::EnGb | Self::FrFr => "%d/%m/%Y",
            Self::EnUs => "%-m/%-d/%Y",
            Self::DeDe => "%d.%m.%Y",
            Self::Iso => "%Y-%m-%d",
        }
    }

    fn time_pattern(self) -> &'static str {
        match self {
            Self::EnUs => "%-I:%M %p",
            _ => "%H:%M",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PtPt => "pt-PT",
            Self::EnUs => "en-US",
            Self::EnGb => "en-GB",
            Self::DeDe => "de-DE",
            Self::FrFr => "fr-FR",
            Self::Iso => "iso",
        }
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocaleTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('_', "-").to_lowercase().as_str() {
            "pt-pt" | "pt" => Ok(Self::PtPt),
            "en-us" | "en" => Ok(Self::EnUs),
            "en-gb" => Ok(Self::EnGb),
            "de-de" | "de" => Ok(Self::DeDe),
            "fr-fr" | "fr" => Ok(Self::FrFr),
            "iso" => Ok(Self::Iso),
            _ => Err(format!(
                "unsupported locale '{}', expected one of pt-PT, en-US, en-GB, de-DE, fr-FR, iso",
                s
            )),
        }
    }
}

/// How provider timestamps are mapped onto calendar days and clock times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeZonePolicy {
    /// Coordinated Universal Time
    Utc,
    /// A fixed offset from UTC
    Fixed(FixedOffset),
    /// The forecast city's own UTC offset as reported by the provider
    #[default]
    City,
    /// This machine's current offset, read when the policy is resolved
    Local,
}

impl TimeZonePolicy {
    /// Resolve into a concrete offset
    ///
    /// `city_offset_seconds` is the provider's UTC shift for the queried city.
    /// `City` falls back to UTC when it is absent or out of range.
    pub fn resolve(self, city_offset_seconds: Option<i32>) -> FixedOffset {
        match self {
            Self::Utc => utc_offset(),
            Self::Fixed(offset) => offset,
            Self::City => city_offset_seconds
                .and_then(FixedOffset::east_opt)
                .unwrap_or_else(|| {
                    tracing::debug!("no usable city offset in payload, using UTC");
                    utc_offset()
                }),
            Self::Local => Local::now().offset().fix(),
        }
    }
}

impl fmt::Display for TimeZonePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc => f.write_str("utc"),
            Self::Fixed(offset) => write!(f, "{}", offset),
            Self::City => f.write_str("city"),
            Self::Local => f.write_str("local"),
        }
    }
}

impl FromStr for TimeZonePolicy {
    type Err = String;

    /// Accepts `utc`, `city`, `local`, or an offset such as `+02:00` / `-0530`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "utc" | "z" => return Ok(Self::Utc),
            "city" => return Ok(Self::City),
            "local" => return Ok(Self::Local),
            _ => {}
        }
        parse_offset(trimmed)
            .map(Self::Fixed)
            .ok_or_else(|| {
                format!(
                    "invalid timezone '{}', expected utc, city, local, or an offset like +02:00",
                    s
                )
            })
    }
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}

/// Parse `+HH:MM`, `-HH:MM`, `+HHMM` or `+HH`
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (
            digits[..2].parse::<i32>().ok()?,
            digits[2..].parse::<i32>().ok()?,
        ),
        _ => return None,
    };
    if hours > 14 || minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Convert provider epoch seconds into a UTC timestamp
pub fn from_epoch_seconds(timestamp_seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp_seconds, 0)
}

/// Format a timestamp as a display date, e.g. `15/07/2024` for `pt-PT`
pub fn format_date(timestamp: DateTime<Utc>, locale: LocaleTag, offset: FixedOffset) -> String {
    timestamp
        .with_timezone(&offset)
        .format(locale.date_pattern())
        .to_string()
}

/// Format only the clock time of a timestamp, e.g. `12:00`
pub fn format_time(timestamp: DateTime<Utc>, locale: LocaleTag, offset: FixedOffset) -> String {
    timestamp
        .with_timezone(&offset)
        .format(locale.time_pattern())
        .to_string()
}
