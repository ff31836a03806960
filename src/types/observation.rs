use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SampleRequest;

/// OHLCV price record returned by a provider for one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Observation {
    /// Flat observation where every price equals `price`.
    pub fn flat(timestamp: DateTime<Utc>, price: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open: price,
            high: price,
            low: price,
            close: price,
            volume,
        }
    }
}

/// Observation paired with the request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledObservation {
    pub request: SampleRequest,
    pub observation: Observation,
}

/// Sort sampled observations into (window index, sample index) order.
pub fn sort_by_schedule(samples: &mut [SampledObservation]) {
    samples.sort_by_key(|s| s.request.schedule_key());
}
