//! Unit tests for EMA indicator

use etf_alert::indicators::trend::{calculate_ema, calculate_ema_series, smoothing_factor};

fn create_test_closes(count: usize, base_price: f64) -> Vec<f64> {
    (0..count).map(|i| base_price + i as f64 * 0.1).collect()
}

#[test]
fn test_ema_output_matches_input_length() {
    for len in 1..30 {
        let closes = create_test_closes(len, 100.0);
        assert_eq!(calculate_ema_series(&closes, 10).len(), len);
    }
}

#[test]
fn test_ema_one_short_of_period_seeds_from_first_close() {
    let closes = vec![10.0, 12.0, 14.0, 16.0];
    let ema = calculate_ema_series(&closes, 5);
    let k = smoothing_factor(5);

    assert_eq!(ema[0], 10.0);
    let mut expected = 10.0;
    for (i, &close) in closes.iter().enumerate().skip(1) {
        expected = close * k + expected * (1.0 - k);
        assert!((ema[i] - expected).abs() < 1e-12);
    }
}

#[test]
fn test_ema_exactly_period_is_simple_average() {
    let closes = vec![10.0, 12.0, 14.0, 16.0, 18.0];
    let ema = calculate_ema_series(&closes, 5);
    assert_eq!(ema, vec![14.0; 5]);
}

#[test]
fn test_ema_recurrence_after_seed() {
    let closes = vec![2.0, 4.0, 6.0, 8.0];
    let ema = calculate_ema_series(&closes, 3);
    // seed 4.0 at index 2, k = 0.5
    assert_eq!(ema, vec![4.0, 4.0, 4.0, 6.0]);
    assert_eq!(calculate_ema(&closes, 3), Some(6.0));
}

#[test]
fn test_period_one_tracks_closes() {
    let closes = create_test_closes(10, 50.0);
    let ema = calculate_ema_series(&closes, 1);
    for (value, close) in ema.iter().zip(&closes) {
        assert!((value - close).abs() < 1e-12);
    }
}

#[test]
fn test_fast_ema_reacts_more_than_slow() {
    let mut closes = vec![100.0; 30];
    closes.push(110.0);
    let fast = calculate_ema(&closes, 5).unwrap();
    let slow = calculate_ema(&closes, 20).unwrap();
    assert!(fast > slow);
    assert!(slow > 100.0);
}
