//! Period planning: duration parsing and lookback window generation.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::types::{DurationUnit, PeriodDuration, TimeWindow};
use chrono::{DateTime, Duration, Utc};
use std::str::FromStr;
use tracing::debug;

/// Parse a period string of the form `<integer><unit>`, e.g. `10min`, `1hora`, `2 days`.
///
/// Matching is case-insensitive, allows whitespace between the number and the unit
/// and accepts a trailing plural `s`. Unknown units are rejected.
pub fn parse_duration(text: &str) -> Result<PeriodDuration> {
    let invalid = || AppError::InvalidDurationFormat(text.to_string());
    let normalized = text.trim().to_lowercase();

    let digits_end = normalized
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(normalized.len());
    if digits_end == 0 {
        return Err(invalid());
    }

    let (digits, rest) = normalized.split_at(digits_end);
    let token = rest.trim_start();
    let unit = DurationUnit::from_token(token)
        .or_else(|| token.strip_suffix('s').and_then(DurationUnit::from_token))
        .ok_or_else(invalid)?;

    let value: u64 = digits.parse().map_err(|_| invalid())?;
    let seconds = i64::try_from(value)
        .ok()
        .and_then(|v| v.checked_mul(unit.seconds()))
        .ok_or_else(invalid)?;
    let span = Duration::try_seconds(seconds).ok_or_else(invalid)?;

    Ok(PeriodDuration::new(value, unit, span))
}

impl FromStr for PeriodDuration {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        parse_duration(s)
    }
}

/// Generate `count` contiguous windows of `duration`, oldest first, the last one
/// ending at `reference`.
pub fn generate_windows(
    duration: &PeriodDuration,
    count: usize,
    reference: DateTime<Utc>,
) -> Result<Vec<TimeWindow>> {
    let span = duration.span();
    let mut windows = Vec::with_capacity(count);
    let mut end = reference;

    for i in 0..count {
        let start = end.checked_sub_signed(span).ok_or_else(|| {
            AppError::WindowOutOfRange(format!(
                "window {} of {} before {} exceeds the supported date range",
                i + 1,
                duration,
                reference
            ))
        })?;
        windows.push(TimeWindow { start, end });
        end = start;
    }

    windows.reverse();
    Ok(windows)
}

/// Plans the lookback windows for one analysis run.
#[derive(Debug, Clone)]
pub struct PeriodPlanner {
    duration: PeriodDuration,
    count: usize,
}

impl PeriodPlanner {
    pub fn new(duration: PeriodDuration, count: usize) -> Self {
        Self { duration, count }
    }

    /// Build a planner from the configured period and period count.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.period_duration()?, config.period_count))
    }

    pub fn duration(&self) -> &PeriodDuration {
        &self.duration
    }

    /// Windows ending at `reference`.
    pub fn plan(&self, reference: DateTime<Utc>) -> Result<Vec<TimeWindow>> {
        let windows = generate_windows(&self.duration, self.count, reference)?;
        debug!(
            "Planned {} windows of {} ending at {}",
            windows.len(),
            self.duration,
            reference
        );
        Ok(windows)
    }

    /// Windows ending now.
    pub fn plan_now(&self) -> Result<Vec<TimeWindow>> {
        self.plan(Utc::now())
    }
}
