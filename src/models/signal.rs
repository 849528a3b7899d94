use crate::models::zone::ZoneAssessment;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
        }
    }

    /// True for BUY and SELL, i.e. the EMAs crossed on the latest point.
    pub fn is_crossover(&self) -> bool {
        !matches!(self, Signal::Hold)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParameterError {
    #[error("EMA periods must be at least 1 (fast: {fast}, slow: {slow})")]
    ZeroPeriod { fast: usize, slow: usize },

    #[error("fast period ({fast}) must be shorter than slow period ({slow})")]
    FastNotShorter { fast: usize, slow: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorParameters {
    fast_period: usize,
    slow_period: usize,
}

impl IndicatorParameters {
    pub fn new(fast_period: usize, slow_period: usize) -> Result<Self, ParameterError> {
        if fast_period == 0 || slow_period == 0 {
            return Err(ParameterError::ZeroPeriod {
                fast: fast_period,
                slow: slow_period,
            });
        }
        if fast_period >= slow_period {
            return Err(ParameterError::FastNotShorter {
                fast: fast_period,
                slow: slow_period,
            });
        }
        Ok(Self {
            fast_period,
            slow_period,
        })
    }

    pub fn fast_period(&self) -> usize {
        self.fast_period
    }

    pub fn slow_period(&self) -> usize {
        self.slow_period
    }
}

impl Default for IndicatorParameters {
    fn default() -> Self {
        Self {
            fast_period: 20,
            slow_period: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResult {
    pub ticker: String,
    pub fast_ema: f64,
    pub slow_ema: f64,
    pub signal: Signal,
    pub as_of_date: NaiveDate,
    pub last_close: f64,
    /// Annualized volatility in percent; `None` when too few closes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volatility: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<ZoneAssessment>,
}

/// One row of the daily report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TickerReport {
    Signal(SignalResult),
    NoData { ticker: String, reason: String },
}

impl TickerReport {
    pub fn no_data(ticker: impl Into<String>, reason: impl Into<String>) -> Self {
        TickerReport::NoData {
            ticker: ticker.into(),
            reason: reason.into(),
        }
    }

    pub fn ticker(&self) -> &str {
        match self {
            TickerReport::Signal(result) => &result.ticker,
            TickerReport::NoData { ticker, .. } => ticker,
        }
    }

    pub fn signal(&self) -> Option<Signal> {
        match self {
            TickerReport::Signal(result) => Some(result.signal),
            TickerReport::NoData { .. } => None,
        }
    }
}
