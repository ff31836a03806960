use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scheduled price query inside a period window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleRequest {
    pub window_index: usize,
    pub sample_index: usize,
    pub timestamp: DateTime<Utc>,
    /// Position inside the window, 0 at the start and 100 at the end.
    pub percentage: f64,
    pub symbol: String,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
}

impl SampleRequest {
    /// Ordering key used to keep observations in schedule order.
    pub fn schedule_key(&self) -> (usize, usize) {
        (self.window_index, self.sample_index)
    }
}
