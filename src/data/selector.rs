//! Daily representative sample selection
//!
//! Providers deliver forecasts as a sub-daily time series (OpenWeatherMap:
//! every 3 hours, 40 entries). Display wants one reading per calendar day,
//! preferably the one around local noon.

use chrono::{DateTime, FixedOffset, NaiveDate, Timelike, Utc};

/// Anything carrying an observation time
pub trait Timestamped {
    fn observed_at(&self) -> DateTime<Utc>;
}

/// Tuning for [`select_daily`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorConfig {
    /// Number of daily samples to produce
    pub days: usize,
    /// Source cadence, used as the stride of the fallback selection
    pub samples_per_day: usize,
    /// First local hour accepted as "noon"
    pub window_start_hour: u32,
    /// Last local hour accepted as "noon" (inclusive)
    pub window_end_hour: u32,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            days: 5,
            samples_per_day: 8,
            window_start_hour: 11,
            window_end_hour: 13,
        }
    }
}

impl SelectorConfig {
    fn in_window(&self, hour: u32) -> bool {
        (self.window_start_hour..=self.window_end_hour).contains(&hour)
    }
}

/// Pick one representative sample per calendar day
///
/// Samples are grouped by local calendar day under `offset`. From each day the
/// first sample whose local hour falls in the noon window is taken. If that
/// yields fewer than `config.days` samples the windowed result is discarded
/// and every `samples_per_day`-th sample from index 0 is taken instead.
///
/// Output is in input order and never longer than `config.days`; short input
/// gives short output.
pub fn select_daily<'a, T: Timestamped>(
    samples: &'a [T],
    offset: &FixedOffset,
    config: &SelectorConfig,
) -> Vec<&'a T> {
    if samples.is_empty() || config.days == 0 {
        return Vec::new();
    }

    let noon_picks: Vec<&T> = partition_by_day(samples, offset)
        .into_iter()
        .filter_map(|(_, day)| {
            day.into_iter()
                .find(|s| config.in_window(s.observed_at().with_timezone(offset).hour()))
        })
        .take(config.days)
        .collect();

    if noon_picks.len() >= config.days {
        return noon_picks;
    }

    tracing::debug!(
        noon_days = noon_picks.len(),
        wanted = config.days,
        "noon window selection insufficient, using fixed stride"
    );

    samples
        .iter()
        .step_by(config.samples_per_day.max(1))
        .take(config.days)
        .collect()
}

/// Group consecutive samples sharing a local calendar date
fn partition_by_day<'a, T: Timestamped>(
    samples: &'a [T],
    offset: &FixedOffset,
) -> Vec<(NaiveDate, Vec<&'a T>)> {
    let mut days: Vec<(NaiveDate, Vec<&T>)> = Vec::new();

    for sample in samples {
        let date = sample.observed_at().with_timezone(offset).date_naive();
        match days.last_mut() {
            Some((current, members)) if *current == date => members.push(sample),
            _ => days.push((date, vec![sample])),
        }
    }

    days
}
