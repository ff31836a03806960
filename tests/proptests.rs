use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use trendwatch::services::{generate_windows, parse_duration, schedule_all};
use trendwatch::{Observation, TrendAnalyzer, TrendDirection};

fn rising(start: f64, steps: &[f64]) -> Vec<f64> {
    let mut closes = vec![start];
    for step in steps {
        let last = closes[closes.len() - 1];
        closes.push(last + step);
    }
    closes
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    #[test]
    fn windows_are_contiguous_and_end_at_reference(
        minutes in 1u64..600,
        count in 1usize..50,
        offset in 0i64..1_000_000,
    ) {
        let reference = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(offset);
        let duration = parse_duration(&format!("{}min", minutes)).unwrap();
        let windows = generate_windows(&duration, count, reference).unwrap();

        prop_assert_eq!(windows.len(), count);
        prop_assert_eq!(windows[count - 1].end, reference);
        for pair in windows.windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].start);
        }
        for window in &windows {
            prop_assert_eq!(window.span(), duration.span());
        }
    }

    #[test]
    fn schedule_is_ordered_and_bounded(
        minutes in 1u64..240,
        count in 1usize..10,
        samples in 1usize..40,
    ) {
        let reference = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let duration = parse_duration(&format!("{}min", minutes)).unwrap();
        let windows = generate_windows(&duration, count, reference).unwrap();
        let requests = schedule_all(&windows, samples, "BTCUSDT");

        prop_assert_eq!(requests.len(), count * samples);
        for pair in requests.windows(2) {
            prop_assert!(pair[0].timestamp <= pair[1].timestamp);
        }
        for request in &requests {
            prop_assert!((0.0..=100.0).contains(&request.percentage));
            prop_assert!(windows[request.window_index].contains(request.timestamp));
        }
    }

    #[test]
    fn score_and_probabilities_are_bounded(closes in prop::collection::vec(0.01f64..100_000.0, 1..80)) {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let series: Vec<Observation> = closes
            .iter()
            .enumerate()
            .map(|(i, close)| Observation::flat(start + Duration::minutes(i as i64), *close, 1.0))
            .collect();

        let result = TrendAnalyzer::new().analyze(&series, "prop").unwrap();
        prop_assert!((0.0..=100.0).contains(&result.score));
        prop_assert!((0.0..=100.0).contains(&result.probability_up));
        prop_assert!((0.0..=100.0).contains(&result.probability_down));
        prop_assert!((result.probability_up + result.probability_down - 100.0).abs() < 1e-6);
        prop_assert!((0.0..=1.0).contains(&result.indicators.confidence));
    }

    #[test]
    fn strictly_increasing_scores_above_neutral(
        start in 1.0f64..10_000.0,
        steps in prop::collection::vec(0.01f64..100.0, 1..60),
    ) {
        let closes = rising(start, &steps);
        let (score, _) = TrendAnalyzer::new().trend_score(&closes);
        prop_assert!(score > 50.0);
        prop_assert_ne!(TrendDirection::from_score(score), TrendDirection::Down);
    }

    #[test]
    fn strictly_decreasing_scores_below_neutral(
        start in 1.0f64..10_000.0,
        steps in prop::collection::vec(0.01f64..100.0, 1..60),
    ) {
        let mut closes = rising(start, &steps);
        closes.reverse();
        let (score, _) = TrendAnalyzer::new().trend_score(&closes);
        prop_assert!(score < 50.0);
        prop_assert_ne!(TrendDirection::from_score(score), TrendDirection::Up);
    }
}
