use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit accepted in a period string such as `10min` or `2dia`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Minute,
    Hour,
    Day,
    Week,
    /// Approximated as 30 days.
    Month,
    /// Approximated as 365 days.
    Year,
}

impl DurationUnit {
    /// Match a lowercase unit token, without a plural `s`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "min" | "minute" => Some(Self::Minute),
            "hora" | "hour" => Some(Self::Hour),
            "dia" | "day" => Some(Self::Day),
            "semana" | "week" => Some(Self::Week),
            "mes" | "month" => Some(Self::Month),
            "ano" | "year" => Some(Self::Year),
            _ => None,
        }
    }

    /// Get the length of one unit in seconds.
    pub fn seconds(&self) -> i64 {
        match self {
            Self::Minute => 60,
            Self::Hour => 3_600,
            Self::Day => 86_400,
            Self::Week => 604_800,
            Self::Month => 30 * 86_400,
            Self::Year => 365 * 86_400,
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minute => write!(f, "minute"),
            Self::Hour => write!(f, "hour"),
            Self::Day => write!(f, "day"),
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
            Self::Year => write!(f, "year"),
        }
    }
}

/// Fixed span of one analysis period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodDuration {
    pub value: u64,
    pub unit: DurationUnit,
    span: Duration,
}

impl PeriodDuration {
    pub(crate) fn new(value: u64, unit: DurationUnit, span: Duration) -> Self {
        Self { value, unit, span }
    }

    pub fn span(&self) -> Duration {
        self.span
    }

    pub fn num_seconds(&self) -> i64 {
        self.span.num_seconds()
    }

    pub fn is_zero(&self) -> bool {
        self.span.is_zero()
    }
}

impl fmt::Display for PeriodDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.value == 1 { "" } else { "s" };
        write!(f, "{} {}{}", self.value, self.unit, plural)
    }
}

/// Analysis window of one period. Both bounds are sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn span(&self) -> Duration {
        self.end - self.start
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}
