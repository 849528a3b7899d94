//! Annualized historical volatility from daily log returns

use crate::common::math;

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Closes used for the volatility estimate (three months of 21 sessions).
pub const VOLATILITY_WINDOW: usize = 63;

/// Annualized volatility in percent over the last `window` closes.
///
/// `None` when fewer than two returns are available or a close is not positive.
pub fn calculate_volatility(closes: &[f64], window: usize) -> Option<f64> {
    let start = closes.len().saturating_sub(window);
    let recent = &closes[start..];
    if recent.iter().any(|&c| c <= 0.0 || !c.is_finite()) {
        return None;
    }

    let returns: Vec<f64> = recent.windows(2).map(|w| (w[1] / w[0]).ln()).collect();
    let std_dev = math::sample_std_dev(&returns)?;
    Some(std_dev * TRADING_DAYS_PER_YEAR.sqrt() * 100.0)
}
