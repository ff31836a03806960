//! Simplified Relative Strength Index (RSI).

use super::{Indicator, IndicatorKind};

const WEIGHT: f64 = 0.3;

/// RSI over the whole close series.
///
/// Unlike the classic 14-period RSI there is no window and no smoothing: the
/// average gain and average loss are plain means over every consecutive change.
/// Values range from 0-100, and a series without any loss reads 100, including
/// a completely flat one.
pub struct Rsi;

impl Rsi {
    fn calculate_rsi(closes: &[f64]) -> Option<f64> {
        if closes.len() < 2 {
            return None;
        }

        let mut gains = 0.0;
        let mut losses = 0.0;
        for pair in closes.windows(2) {
            let change = pair[1] - pair[0];
            if change > 0.0 {
                gains += change;
            } else {
                losses -= change;
            }
        }

        let count = (closes.len() - 1) as f64;
        let avg_gain = gains / count;
        let avg_loss = losses / count;

        if avg_loss == 0.0 {
            return Some(100.0);
        }

        let rs = avg_gain / avg_loss;
        Some(100.0 - (100.0 / (1.0 + rs)))
    }
}

impl Indicator for Rsi {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Rsi
    }

    fn min_periods(&self) -> usize {
        2
    }

    fn calculate(&self, closes: &[f64]) -> Option<f64> {
        Self::calculate_rsi(closes)
    }

    fn score_contribution(&self, value: f64) -> f64 {
        (value - 50.0) * WEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uptrend(count: usize) -> Vec<f64> {
        (0..count).map(|i| 100.0 + i as f64 * 1.5).collect()
    }

    fn downtrend(count: usize) -> Vec<f64> {
        (0..count).map(|i| 200.0 - i as f64 * 1.5).collect()
    }

    #[test]
    fn test_rsi_insufficient_data() {
        assert!(Rsi.calculate(&[100.0]).is_none());
        assert!(Rsi.calculate(&[]).is_none());
    }

    #[test]
    fn test_rsi_uptrend_is_max() {
        assert_eq!(Rsi.calculate(&uptrend(10)), Some(100.0));
    }

    #[test]
    fn test_rsi_downtrend_is_zero() {
        assert_eq!(Rsi.calculate(&downtrend(10)), Some(0.0));
    }

    #[test]
    fn test_rsi_flat_series_reads_100() {
        assert_eq!(Rsi.calculate(&[100.0, 100.0, 100.0]), Some(100.0));
    }

    #[test]
    fn test_rsi_mixed_series() {
        // gains 2 + 4, losses 1 + 1
        let rsi = Rsi.calculate(&[100.0, 102.0, 101.0, 105.0, 104.0]).unwrap();
        assert!((rsi - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_rsi_contribution_range() {
        assert!((Rsi.score_contribution(100.0) - 15.0).abs() < 1e-12);
        assert!((Rsi.score_contribution(0.0) + 15.0).abs() < 1e-12);
        assert_eq!(Rsi.score_contribution(50.0), 0.0);
    }
}
