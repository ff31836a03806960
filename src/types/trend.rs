use serde::{Deserialize, Serialize};
use std::fmt;

/// Trend classification derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Undefined,
}

impl TrendDirection {
    /// Classify a 0-100 score: above 60 is up, below 40 is down.
    pub fn from_score(score: f64) -> Self {
        if score > 60.0 {
            Self::Up
        } else if score < 40.0 {
            Self::Down
        } else {
            Self::Undefined
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Undefined => write!(f, "undefined"),
        }
    }
}

/// Raw indicator values behind a trend score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendIndicators {
    /// Relative change between first and last close.
    pub price_change: f64,
    pub rsi: f64,
    /// `tanh(price_change * 10)`, in -1..1.
    pub momentum: f64,
    /// Sample standard deviation of closes over their mean.
    pub volatility: f64,
    pub confidence: f64,
}

/// Outcome of analyzing one observation series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendResult {
    pub score: f64,
    pub classification: TrendDirection,
    pub probability_up: f64,
    pub probability_down: f64,
    pub source_reference: String,
    pub indicators: TrendIndicators,
}
