//! Signal evaluation engine: EMA pair plus crossover decision.

use crate::indicators::{calculate_ema_series, calculate_volatility, VOLATILITY_WINDOW};
use crate::models::price::PriceSeries;
use crate::models::signal::{IndicatorParameters, SignalResult};
use crate::signals::crossover::derive_signal;
use crate::signals::error::SignalError;
use crate::signals::zone::assess_zone;

/// Crossover detection needs a current and a previous point.
pub const MIN_POINTS: usize = 2;

pub struct SignalEngine;

impl SignalEngine {
    /// Evaluate the EMA crossover signal for one ticker.
    pub fn evaluate(
        ticker: &str,
        series: &PriceSeries,
        params: &IndicatorParameters,
    ) -> Result<SignalResult, SignalError> {
        let insufficient = || SignalError::InsufficientData {
            ticker: ticker.to_string(),
            points: series.len(),
            required: MIN_POINTS,
        };

        if series.len() < MIN_POINTS {
            return Err(insufficient());
        }
        let last = *series.last().ok_or_else(insufficient)?;

        let closes = series.closes();
        let fast = calculate_ema_series(&closes, params.fast_period());
        let slow = calculate_ema_series(&closes, params.slow_period());
        let volatility = calculate_volatility(&closes, VOLATILITY_WINDOW);

        Ok(SignalResult {
            ticker: ticker.to_string(),
            fast_ema: fast.last().copied().ok_or_else(insufficient)?,
            slow_ema: slow.last().copied().ok_or_else(insufficient)?,
            signal: derive_signal(&fast, &slow),
            as_of_date: last.date,
            last_close: last.close,
            volatility,
            zone: assess_zone(&closes, volatility),
        })
    }
}
