//! Fast/slow EMA crossover detection.

use crate::common::math;
use crate::models::signal::Signal;
use std::cmp::Ordering;

fn compare(fast: f64, slow: f64) -> Ordering {
    if math::approx_eq(fast, slow) {
        Ordering::Equal
    } else if fast > slow {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}

/// Derive a signal from the last two points of each EMA series.
///
/// BUY when fast moves from at-or-below slow to above it, SELL on the mirror
/// move, HOLD otherwise. Fewer than two points on either side is HOLD.
pub fn derive_signal(fast_ema: &[f64], slow_ema: &[f64]) -> Signal {
    let (Some(fast), Some(slow)) = (last_two(fast_ema), last_two(slow_ema)) else {
        return Signal::Hold;
    };

    let previous = compare(fast.0, slow.0);
    let current = compare(fast.1, slow.1);

    match (previous, current) {
        (Ordering::Less | Ordering::Equal, Ordering::Greater) => Signal::Buy,
        (Ordering::Greater | Ordering::Equal, Ordering::Less) => Signal::Sell,
        _ => Signal::Hold,
    }
}

fn last_two(series: &[f64]) -> Option<(f64, f64)> {
    match series {
        [.., previous, current] => Some((*previous, *current)),
        _ => None,
    }
}
