//! Spreads sample queries evenly across each period window.

use crate::types::{SampleRequest, TimeWindow};
use chrono::{DateTime, Duration, Utc};

/// Schedule `sample_count` evenly spaced requests inside `window`.
///
/// A count of 0 or 1 yields a single request at the window start.
pub fn schedule_window(
    window_index: usize,
    window: &TimeWindow,
    sample_count: usize,
    symbol: &str,
) -> Vec<SampleRequest> {
    let request = |sample_index: usize, timestamp: DateTime<Utc>, percentage: f64| SampleRequest {
        window_index,
        sample_index,
        timestamp,
        percentage,
        symbol: symbol.to_string(),
        window_start: window.start,
        window_end: window.end,
    };

    if sample_count <= 1 {
        return vec![request(0, window.start, 0.0)];
    }

    let steps = sample_count - 1;
    let interval = window.span() / to_i32(steps);

    (0..sample_count)
        .map(|i| {
            let timestamp = (window.start + offset(interval, i)).min(window.end);
            let percentage = i as f64 / steps as f64 * 100.0;
            request(i, timestamp, percentage)
        })
        .collect()
}

/// Schedule every window in order and concatenate the requests.
pub fn schedule_all(windows: &[TimeWindow], sample_count: usize, symbol: &str) -> Vec<SampleRequest> {
    windows
        .iter()
        .enumerate()
        .flat_map(|(idx, window)| schedule_window(idx, window, sample_count, symbol))
        .collect()
}

fn to_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

// `interval * i` never exceeds the window span for i <= steps.
fn offset(interval: Duration, i: usize) -> Duration {
    interval * to_i32(i)
}

/// Schedules sample requests for one instrument.
#[derive(Debug, Clone)]
pub struct QueryScheduler {
    symbol: String,
    samples_per_period: usize,
}

impl QueryScheduler {
    pub fn new(symbol: impl Into<String>, samples_per_period: usize) -> Self {
        Self {
            symbol: symbol.into(),
            samples_per_period,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn samples_per_period(&self) -> usize {
        self.samples_per_period
    }

    pub fn schedule(&self, windows: &[TimeWindow]) -> Vec<SampleRequest> {
        schedule_all(windows, self.samples_per_period, &self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, h, m, s).unwrap()
    }

    fn window(start: DateTime<Utc>, end: DateTime<Utc>) -> TimeWindow {
        TimeWindow { start, end }
    }

    // =========================================================================
    // schedule_window Tests
    // =========================================================================

    #[test]
    fn test_single_sample_at_window_start() {
        let w = window(at(0, 0, 0), at(0, 10, 0));
        let requests = schedule_window(0, &w, 1, "BTCUSDT");

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].timestamp, w.start);
        assert_eq!(requests[0].percentage, 0.0);
        assert_eq!(requests[0].sample_index, 0);
    }

    #[test]
    fn test_zero_samples_treated_as_one() {
        let w = window(at(0, 0, 0), at(0, 10, 0));
        assert_eq!(schedule_window(0, &w, 0, "BTCUSDT").len(), 1);
    }

    #[test]
    fn test_three_samples_scenario() {
        let w = window(at(0, 0, 0), at(0, 10, 0));
        let requests = schedule_window(0, &w, 3, "BTCUSDT");

        let timestamps: Vec<_> = requests.iter().map(|r| r.timestamp).collect();
        let percentages: Vec<_> = requests.iter().map(|r| r.percentage).collect();
        assert_eq!(timestamps, vec![at(0, 0, 0), at(0, 5, 0), at(0, 10, 0)]);
        assert_eq!(percentages, vec![0.0, 50.0, 100.0]);
    }

    #[test]
    fn test_uneven_interval_stays_in_window() {
        let w = window(at(0, 0, 0), at(0, 10, 0));
        let requests = schedule_window(4, &w, 7, "ETHUSDT");

        assert_eq!(requests.len(), 7);
        assert_eq!(requests.last().unwrap().percentage, 100.0);
        for pair in requests.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
        for r in &requests {
            assert!(w.contains(r.timestamp));
            assert_eq!(r.window_index, 4);
            assert_eq!(r.window_start, w.start);
            assert_eq!(r.window_end, w.end);
            assert_eq!(r.symbol, "ETHUSDT");
        }
    }

    #[test]
    fn test_percentages_follow_position() {
        let w = window(at(0, 0, 0), at(1, 0, 0));
        let requests = schedule_window(0, &w, 5, "BTCUSDT");
        let percentages: Vec<_> = requests.iter().map(|r| r.percentage).collect();
        assert_eq!(percentages, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn test_zero_width_window() {
        let w = window(at(0, 0, 0), at(0, 0, 0));
        let requests = schedule_window(0, &w, 3, "BTCUSDT");
        assert_eq!(requests.len(), 3);
        assert!(requests.iter().all(|r| r.timestamp == w.start));
    }

    // =========================================================================
    // schedule_all Tests
    // =========================================================================

    #[test]
    fn test_schedule_all_concatenates_in_order() {
        let windows = vec![
            window(at(0, 0, 0), at(0, 10, 0)),
            window(at(0, 10, 0), at(0, 20, 0)),
        ];
        let requests = schedule_all(&windows, 3, "BTCUSDT");

        assert_eq!(requests.len(), 6);
        let keys: Vec<_> = requests.iter().map(|r| r.schedule_key()).collect();
        assert_eq!(keys, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
        assert_eq!(requests[3].timestamp, at(0, 10, 0));
    }

    #[test]
    fn test_schedule_all_is_deterministic() {
        let windows = vec![window(at(0, 0, 0), at(0, 10, 0))];
        assert_eq!(
            schedule_all(&windows, 4, "BTCUSDT"),
            schedule_all(&windows, 4, "BTCUSDT")
        );
    }

    #[test]
    fn test_scheduler_struct() {
        let scheduler = QueryScheduler::new("AAPL", 2);
        let windows = vec![window(at(0, 0, 0), at(0, 10, 0))];
        let requests = scheduler.schedule(&windows);
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].timestamp, at(0, 10, 0));
        assert_eq!(scheduler.symbol(), "AAPL");
    }
}
