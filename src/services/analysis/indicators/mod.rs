//! Indicators combined into the trend score.

pub mod momentum;
pub mod price_change;
pub mod rsi;
pub mod volatility;

pub use momentum::Momentum;
pub use price_change::PriceChange;
pub use rsi::Rsi;
pub use volatility::relative_volatility;

/// Which breakdown field an indicator reports into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    PriceChange,
    Rsi,
    Momentum,
}

impl IndicatorKind {
    pub fn id(&self) -> &'static str {
        match self {
            Self::PriceChange => "price_change",
            Self::Rsi => "rsi",
            Self::Momentum => "momentum",
        }
    }
}

/// A price indicator that contributes to the 50-centred trend score.
pub trait Indicator: Send + Sync {
    fn kind(&self) -> IndicatorKind;

    /// Minimum number of closes required for calculation.
    fn min_periods(&self) -> usize;

    /// Calculate the raw indicator value from close prices.
    /// Returns None if there is not enough data.
    fn calculate(&self, closes: &[f64]) -> Option<f64>;

    /// Points this value adds to (or removes from) the neutral score of 50.
    fn score_contribution(&self, value: f64) -> f64;
}

/// Indicators used by the trend score, in evaluation order.
pub fn score_indicators() -> Vec<Box<dyn Indicator>> {
    vec![
        Box::new(PriceChange),
        Box::new(Rsi),
        Box::new(Momentum),
    ]
}

/// Relative change between the first and last close.
pub(crate) fn relative_change(closes: &[f64]) -> Option<f64> {
    if closes.len() < 2 {
        return None;
    }
    let first = *closes.first()?;
    let last = *closes.last()?;
    Some((last - first) / first)
}
