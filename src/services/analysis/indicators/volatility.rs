//! Relative volatility of a close series.

/// Sample standard deviation of `closes` divided by their mean.
///
/// Returns None for fewer than two closes.
pub fn relative_volatility(closes: &[f64]) -> Option<f64> {
    if closes.len() < 2 {
        return None;
    }

    let n = closes.len() as f64;
    let mean = closes.iter().sum::<f64>() / n;
    let variance = closes.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / (n - 1.0);

    Some(variance.sqrt() / mean)
}
