//! EMA (Exponential Moving Average) indicator
//!
//! Seeding: with at least `period` closes the seed is the simple average of
//! the first `period` closes, placed at index `period - 1` and repeated over
//! the earlier indices. With fewer closes the first close is the seed. The
//! returned series always has one value per input close.

use crate::common::math;

/// Smoothing factor for a period.
pub fn smoothing_factor(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// Calculate the full EMA series for `closes`.
///
/// Returns an empty vector for empty input or a zero period.
pub fn calculate_ema_series(closes: &[f64], period: usize) -> Vec<f64> {
    if closes.is_empty() || period == 0 {
        return Vec::new();
    }

    let k = smoothing_factor(period);
    let (seed, seed_index) = if closes.len() >= period {
        match math::mean(&closes[..period]) {
            Some(avg) => (avg, period - 1),
            None => return Vec::new(),
        }
    } else {
        (closes[0], 0)
    };

    let mut ema = Vec::with_capacity(closes.len());
    ema.resize(seed_index + 1, seed);

    let mut prev = seed;
    for &close in &closes[seed_index + 1..] {
        prev = close * k + prev * (1.0 - k);
        ema.push(prev);
    }
    ema
}

/// Latest EMA value for `closes`, if any.
pub fn calculate_ema(closes: &[f64], period: usize) -> Option<f64> {
    calculate_ema_series(closes, period).last().copied()
}
