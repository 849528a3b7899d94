//! Unit tests for signal engine

use crate::common::create_series;
use chrono::NaiveDate;
use etf_alert::indicators::calculate_ema_series;
use etf_alert::models::{IndicatorParameters, Signal};
use etf_alert::signals::{derive_signal, SignalEngine, SignalError};

fn params(fast: usize, slow: usize) -> IndicatorParameters {
    IndicatorParameters::new(fast, slow).unwrap()
}

#[test]
fn test_evaluate_single_point_is_insufficient() {
    let series = create_series(&[100.0]);
    let err = SignalEngine::evaluate("SPY", &series, &params(2, 4)).unwrap_err();
    assert_eq!(
        err,
        SignalError::InsufficientData {
            ticker: "SPY".to_string(),
            points: 1,
            required: 2,
        }
    );
}

#[test]
fn test_evaluate_empty_series_is_insufficient() {
    let series = create_series(&[]);
    assert!(SignalEngine::evaluate("SPY", &series, &params(2, 4)).is_err());
}

#[test]
fn test_evaluate_two_points_succeeds() {
    let series = create_series(&[100.0, 101.0]);
    let result = SignalEngine::evaluate("SPY", &series, &params(2, 4)).unwrap();
    assert_eq!(result.ticker, "SPY");
    assert_eq!(result.as_of_date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    assert_eq!(result.last_close, 101.0);
    assert!(result.fast_ema.is_finite());
    assert!(result.slow_ema.is_finite());
}

#[test]
fn test_step_series_buys_at_jump_then_holds() {
    let closes = [10.0, 10.0, 10.0, 10.0, 20.0, 20.0, 20.0, 20.0];
    let p = params(2, 4);

    let at_jump = SignalEngine::evaluate("ETF", &create_series(&closes[..5]), &p).unwrap();
    assert_eq!(at_jump.signal, Signal::Buy);
    assert!(at_jump.fast_ema > at_jump.slow_ema);

    for end in 6..=closes.len() {
        let result = SignalEngine::evaluate("ETF", &create_series(&closes[..end]), &p).unwrap();
        assert_eq!(result.signal, Signal::Hold, "expected HOLD at index {}", end - 1);
    }
}

#[test]
fn test_step_series_ema_values() {
    let closes = [10.0, 10.0, 10.0, 10.0, 20.0];
    let fast = calculate_ema_series(&closes, 2);
    let slow = calculate_ema_series(&closes, 4);
    assert!((fast[4] - 50.0 / 3.0).abs() < 1e-9);
    assert!((slow[4] - 14.0).abs() < 1e-9);
    assert_eq!(derive_signal(&fast, &slow), Signal::Buy);
}

#[test]
fn test_evaluate_is_idempotent() {
    let series = create_series(&[10.0, 11.5, 9.8, 12.2, 13.0, 12.4, 14.1, 13.9]);
    let p = params(3, 5);
    let first = SignalEngine::evaluate("QQQ", &series, &p).unwrap();
    let second = SignalEngine::evaluate("QQQ", &series, &p).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.fast_ema.to_bits(), second.fast_ema.to_bits());
    assert_eq!(first.slow_ema.to_bits(), second.slow_ema.to_bits());
}

#[test]
fn test_constant_series_holds() {
    let series = create_series(&[42.0; 60]);
    let result = SignalEngine::evaluate("GOLDBEES.NS", &series, &params(20, 50)).unwrap();
    assert_eq!(result.signal, Signal::Hold);
    assert!((result.fast_ema - 42.0).abs() < 1e-9);
    assert!((result.slow_ema - 42.0).abs() < 1e-9);
    assert_eq!(result.volatility, Some(0.0));
}

#[test]
fn test_parameters_validation() {
    assert!(IndicatorParameters::new(0, 5).is_err());
    assert!(IndicatorParameters::new(5, 5).is_err());
    assert!(IndicatorParameters::new(6, 5).is_err());
    let p = IndicatorParameters::new(5, 6).unwrap();
    assert_eq!((p.fast_period(), p.slow_period()), (5, 6));
}
