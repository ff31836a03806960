//! Momentum: the first-to-last price change squashed through `tanh`.

use super::{relative_change, Indicator, IndicatorKind};

/// Scale applied before `tanh`, so a 10% move is already well into saturation.
const SENSITIVITY: f64 = 10.0;
const WEIGHT: f64 = 20.0;

/// Momentum indicator, normalized to -1..1.
///
/// Derived from the same closes as [`super::PriceChange`], so the two terms
/// reinforce each other in the trend score.
pub struct Momentum;

impl Indicator for Momentum {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Momentum
    }

    fn min_periods(&self) -> usize {
        2
    }

    fn calculate(&self, closes: &[f64]) -> Option<f64> {
        relative_change(closes).map(|change| (change * SENSITIVITY).tanh())
    }

    fn score_contribution(&self, value: f64) -> f64 {
        value * WEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_momentum_bounded() {
        let up = Momentum.calculate(&[100.0, 1000.0]).unwrap();
        let down = Momentum.calculate(&[1000.0, 1.0]).unwrap();
        assert!(up <= 1.0 && up > 0.99);
        assert!(down >= -1.0 && down < -0.99);
    }

    #[test]
    fn test_momentum_value() {
        let value = Momentum.calculate(&[100.0, 110.0]).unwrap();
        assert!((value - 1.0_f64.tanh()).abs() < 1e-12);
        assert!((Momentum.score_contribution(value) - 15.231883).abs() < 1e-6);
    }

    #[test]
    fn test_momentum_flat() {
        assert_eq!(Momentum.calculate(&[50.0, 50.0]), Some(0.0));
    }
}
