//! Trend analysis service.
//!
//! Combines price change, RSI and momentum into a 0-100 trend score,
//! classifies it, and turns it into up/down probabilities weighted by
//! how calm the price series was.

pub mod indicators;

use crate::error::{AppError, Result};
use crate::types::{Observation, TrendDirection, TrendIndicators, TrendResult};
use indicators::{relative_volatility, score_indicators, Indicator, IndicatorKind};
use tracing::debug;

/// Score of a series with no directional information.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Volatility multiplier: 10% relative volatility removes all confidence.
const VOLATILITY_PENALTY: f64 = 10.0;

/// Computes trend results from ordered observation series.
pub struct TrendAnalyzer {
    indicators: Vec<Box<dyn Indicator>>,
}

impl TrendAnalyzer {
    pub fn new() -> Self {
        Self {
            indicators: score_indicators(),
        }
    }

    /// Analyze a series ordered by (window index, sample index).
    ///
    /// `source_reference` identifies the stored dataset the series came from.
    pub fn analyze(
        &self,
        series: &[Observation],
        source_reference: impl Into<String>,
    ) -> Result<TrendResult> {
        let closes = validated_closes(series)?;

        let (score, mut breakdown) = self.trend_score(&closes);
        let classification = TrendDirection::from_score(score);

        let volatility = relative_volatility(&closes);
        let confidence = confidence(volatility);
        breakdown.volatility = volatility.unwrap_or(0.0);
        breakdown.confidence = confidence;

        let probability_up = NEUTRAL_SCORE + (score - NEUTRAL_SCORE) * confidence;
        let probability_down = NEUTRAL_SCORE + ((100.0 - score) - NEUTRAL_SCORE) * confidence;

        debug!(
            "Analyzed {} closes: score={:.2} rsi={:.2} confidence={:.3}",
            closes.len(),
            score,
            breakdown.rsi,
            confidence
        );

        Ok(TrendResult {
            score,
            classification,
            probability_up,
            probability_down,
            source_reference: source_reference.into(),
            indicators: breakdown,
        })
    }

    /// Trend score in 0..=100 plus the indicator values behind it.
    pub fn trend_score(&self, closes: &[f64]) -> (f64, TrendIndicators) {
        let mut breakdown = TrendIndicators {
            rsi: NEUTRAL_SCORE,
            ..TrendIndicators::default()
        };

        if closes.len() < 2 {
            return (NEUTRAL_SCORE, breakdown);
        }

        let mut score = NEUTRAL_SCORE;
        for indicator in &self.indicators {
            if closes.len() < indicator.min_periods() {
                continue;
            }
            let Some(value) = indicator.calculate(closes) else {
                continue;
            };
            score += indicator.score_contribution(value);
            debug!("{} = {:.6}", indicator.kind().id(), value);

            match indicator.kind() {
                IndicatorKind::PriceChange => breakdown.price_change = value,
                IndicatorKind::Rsi => breakdown.rsi = value,
                IndicatorKind::Momentum => breakdown.momentum = value,
            }
        }

        (score.clamp(0.0, 100.0), breakdown)
    }
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn validated_closes(series: &[Observation]) -> Result<Vec<f64>> {
    if series.is_empty() {
        return Err(AppError::EmptySeries);
    }

    let closes: Vec<f64> = series.iter().map(|o| o.close).collect();
    if let Some(idx) = closes.iter().position(|c| !c.is_finite()) {
        return Err(AppError::InvalidSeries(format!(
            "close at position {} is not a finite number",
            idx
        )));
    }
    if closes.len() >= 2 && closes[0] == 0.0 {
        return Err(AppError::InvalidSeries(
            "first close is zero, relative change is undefined".to_string(),
        ));
    }

    Ok(closes)
}

/// Confidence in 0..=1; unknown volatility gives no confidence.
fn confidence(volatility: Option<f64>) -> f64 {
    match volatility {
        Some(v) if v.is_finite() => (1.0 - v * VOLATILITY_PENALTY).clamp(0.0, 1.0),
        _ => 0.0,
    }
}
