//! Market data provider interface.

use crate::models::price::PriceSeries;
use crate::services::error::MarketDataError;

#[async_trait::async_trait]
pub trait PriceSeriesProvider {
    /// Daily closes for `ticker` covering the last `lookback_days` calendar days,
    /// ascending by date.
    async fn fetch(&self, ticker: &str, lookback_days: u32) -> Result<PriceSeries, MarketDataError>;
}
