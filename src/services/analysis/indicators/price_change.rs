//! Price change between the first and last close.

use super::{relative_change, Indicator, IndicatorKind};

/// Weight of a relative change in score points (a 50% move adds 50).
const WEIGHT: f64 = 100.0;

pub struct PriceChange;

impl Indicator for PriceChange {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::PriceChange
    }

    fn min_periods(&self) -> usize {
        2
    }

    fn calculate(&self, closes: &[f64]) -> Option<f64> {
        relative_change(closes)
    }

    fn score_contribution(&self, value: f64) -> f64 {
        value * WEIGHT
    }
}
