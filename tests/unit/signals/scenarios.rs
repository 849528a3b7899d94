//! Market scenarios: each signal is checked at every point of the series.

use crate::common::step_closes;
use etf_alert::indicators::calculate_ema_series;
use etf_alert::models::Signal;
use etf_alert::signals::derive_signal;

/// Signal at every index from 1 onward, using only data up to that index.
fn signal_path(closes: &[f64], fast_period: usize, slow_period: usize) -> Vec<(usize, Signal)> {
    let fast = calculate_ema_series(closes, fast_period);
    let slow = calculate_ema_series(closes, slow_period);
    (2..=closes.len())
        .map(|end| (end - 1, derive_signal(&fast[..end], &slow[..end])))
        .collect()
}

fn crossovers(path: &[(usize, Signal)]) -> Vec<(usize, Signal)> {
    path.iter().copied().filter(|(_, s)| s.is_crossover()).collect()
}

#[test]
fn test_step_up_buys_exactly_once() {
    let closes = step_closes(10.0, 20.0, 30, 30);
    let path = signal_path(&closes, 5, 20);
    assert_eq!(crossovers(&path), vec![(30, Signal::Buy)]);
}

#[test]
fn test_step_down_sells_exactly_once() {
    let closes = step_closes(20.0, 10.0, 30, 30);
    let path = signal_path(&closes, 5, 20);
    assert_eq!(crossovers(&path), vec![(30, Signal::Sell)]);
}

#[test]
fn test_buy_is_first_point_fast_exceeds_slow() {
    let closes = step_closes(100.0, 105.0, 25, 15);
    let fast = calculate_ema_series(&closes, 3);
    let slow = calculate_ema_series(&closes, 10);
    let first_above = (0..closes.len()).find(|&i| fast[i] > slow[i] + 1e-9).unwrap();

    let path = signal_path(&closes, 3, 10);
    assert_eq!(crossovers(&path), vec![(first_above, Signal::Buy)]);
}

#[test]
fn test_flat_market_never_crosses() {
    let closes = vec![75.25; 120];
    assert!(crossovers(&signal_path(&closes, 20, 50)).is_empty());
}

#[test]
fn test_round_trip_buy_then_sell() {
    let mut closes = step_closes(10.0, 20.0, 30, 30);
    closes.extend(std::iter::repeat(5.0).take(30));
    let signals: Vec<Signal> = crossovers(&signal_path(&closes, 5, 20))
        .into_iter()
        .map(|(_, s)| s)
        .collect();
    assert_eq!(signals, vec![Signal::Buy, Signal::Sell]);
}

#[test]
fn test_steady_uptrend_holds_after_warmup() {
    let closes: Vec<f64> = (0..80).map(|i| 100.0 + i as f64 * 0.5).collect();
    let path = signal_path(&closes, 5, 20);
    // Fast stays above slow once the slow seed is in place.
    assert!(path
        .iter()
        .filter(|(i, _)| *i > 20)
        .all(|(_, s)| *s == Signal::Hold));
}
