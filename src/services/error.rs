//! Errors raised by the external collaborators.

use thiserror::Error;

/// Price data could not be obtained for a ticker.
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("unknown ticker: {ticker}")]
    InvalidTicker { ticker: String },

    #[error("market data provider unreachable for {ticker}: {reason}")]
    Unreachable { ticker: String, reason: String },

    #[error("malformed market data response for {ticker}: {reason}")]
    MalformedResponse { ticker: String, reason: String },

    #[error("no price data returned for {ticker}")]
    Empty { ticker: String },
}

/// The report email could not be delivered.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("invalid email address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("failed to build email: {0}")]
    Message(String),

    #[error("email transport failed: {0}")]
    Transport(String),
}

impl MarketDataError {
    /// Short description without the ticker, used for report rows.
    pub fn reason(&self) -> String {
        match self {
            MarketDataError::InvalidTicker { .. } => "unknown ticker".to_string(),
            MarketDataError::Unreachable { .. } => "market data provider unreachable".to_string(),
            MarketDataError::MalformedResponse { .. } => "malformed market data response".to_string(),
            MarketDataError::Empty { .. } => "no price data returned".to_string(),
        }
    }
}
