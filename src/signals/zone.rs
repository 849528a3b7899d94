//! Accumulation zone assessment over the long-horizon EMAs.

use crate::common::math::{approx_eq, percentage_distance};
use crate::indicators::calculate_ema;
use crate::models::zone::{EmaLevel, Zone, ZoneAssessment};

/// EMAs the zone is measured against, shortest first.
pub const ZONE_EMA_PERIODS: [usize; 4] = [20, 50, 100, 200];

/// Annualized volatility (percent) above which accumulation is not flagged.
pub const VOLATILITY_THRESHOLD: f64 = 2.5;

/// Lowest zone score that can be flagged for accumulation (Great).
pub const ACCUMULATE_MIN_SCORE: u8 = 75;

pub fn assess_zone(closes: &[f64], volatility: Option<f64>) -> Option<ZoneAssessment> {
    let last_close = *closes.last()?;

    let levels = ZONE_EMA_PERIODS
        .iter()
        .map(|&period| {
            let value = calculate_ema(closes, period)?;
            let distance_pct = if approx_eq(last_close, value) {
                0.0
            } else {
                percentage_distance(last_close, value)
            };
            Some(EmaLevel {
                period,
                value,
                distance_pct,
            })
        })
        .collect::<Option<Vec<_>>>()?;

    let distances: [f64; 4] = std::array::from_fn(|i| levels[i].distance_pct);
    let zone = Zone::classify(distances);

    let within_volatility_threshold = volatility.is_some_and(|v| v <= VOLATILITY_THRESHOLD);

    Some(ZoneAssessment {
        accumulate: zone.score() >= ACCUMULATE_MIN_SCORE && within_volatility_threshold,
        levels,
        zone,
        within_volatility_threshold,
    })
}
