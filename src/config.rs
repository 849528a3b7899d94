//! Runtime configuration, read once from the environment at startup.

use crate::models::signal::{IndicatorParameters, ParameterError};
use crate::services::mailer::SmtpSettings;
use crate::services::yahoo::DEFAULT_CHART_URL;
use crate::signals::zone::ZONE_EMA_PERIODS;
use std::env;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_TICKERS: &[&str] = &[
    "NIFTYBEES.NS",
    "BANKBEES.NS",
    "GOLDBEES.NS",
    "AUTOBEES.NS",
    "ITBEES.NS",
    "JUNIORBEES.NS",
    "PHARMABEES.NS",
    "SPY",
    "QQQ",
];

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 465;

/// Calendar days requested per period of the longest tracked EMA when
/// `LOOKBACK_DAYS` is unset.
pub const LOOKBACK_MULTIPLIER: u32 = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },

    #[error(transparent)]
    Parameters(#[from] ParameterError),
}

/// Deployment environment name (`ENVIRONMENT`), defaulting to `sandbox`.
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone)]
pub struct AlertConfig {
    pub tickers: Vec<String>,
    pub params: IndicatorParameters,
    pub lookback_days: u32,
    pub recipients: Vec<String>,
    pub smtp: SmtpSettings,
    pub market_data_url: String,
}

impl AlertConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let tickers = match get("TICKERS") {
            Some(raw) => split_list(&raw),
            None => DEFAULT_TICKERS.iter().map(|t| t.to_string()).collect(),
        };
        if tickers.is_empty() {
            return Err(ConfigError::Missing("TICKERS"));
        }

        let fast = parse_or("EMA_FAST_PERIOD", get("EMA_FAST_PERIOD"), 20usize)?;
        let slow = parse_or("EMA_SLOW_PERIOD", get("EMA_SLOW_PERIOD"), 50usize)?;
        let params = IndicatorParameters::new(fast, slow)?;

        let longest = ZONE_EMA_PERIODS.iter().copied().fold(slow, usize::max);
        let default_lookback = u32::try_from(longest)
            .unwrap_or(u32::MAX)
            .saturating_mul(LOOKBACK_MULTIPLIER);
        let lookback_days = parse_or("LOOKBACK_DAYS", get("LOOKBACK_DAYS"), default_lookback)?;
        if lookback_days == 0 {
            return Err(ConfigError::Invalid {
                key: "LOOKBACK_DAYS",
                value: "0".to_string(),
            });
        }

        let sender = get("EMAIL").ok_or(ConfigError::Missing("EMAIL"))?;
        let password = get("PASS").ok_or(ConfigError::Missing("PASS"))?;
        let recipients = get("EMAIL_RECEIVER")
            .map(|raw| split_list(&raw))
            .unwrap_or_default();
        if recipients.is_empty() {
            return Err(ConfigError::Missing("EMAIL_RECEIVER"));
        }

        let smtp = SmtpSettings {
            host: get("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            port: parse_or("SMTP_PORT", get("SMTP_PORT"), DEFAULT_SMTP_PORT)?,
            username: sender.trim().to_string(),
            password,
            sender: sender.trim().to_string(),
        };

        Ok(Self {
            tickers,
            params,
            lookback_days,
            recipients,
            smtp,
            market_data_url: get("MARKET_DATA_URL").unwrap_or_else(|| DEFAULT_CHART_URL.to_string()),
        })
    }
}

/// Comma-separated list: trimmed, blanks dropped, first occurrence wins.
fn split_list(raw: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !items.iter().any(|existing| existing == item) {
            items.push(item.to_string());
        }
    }
    items
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
