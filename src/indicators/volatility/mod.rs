//! Volatility indicators: historical (close-to-close) volatility

pub mod historical;

pub use historical::*;
