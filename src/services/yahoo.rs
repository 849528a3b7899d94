//! Yahoo Finance price provider
//!
//! Reads daily bars from the v8 chart API and reduces them to adjusted
//! closing prices. Non-trading rows (null closes) are skipped; a repeated
//! date keeps the most recent row, which is how Yahoo reports the live bar.

use crate::models::price::{PricePoint, PriceSeries};
use crate::services::error::MarketDataError;
use crate::services::market_data::PriceSeriesProvider;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const DEFAULT_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjCloseData>>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseData {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

pub struct YahooPriceProvider {
    base_url: String,
    client: reqwest::Client,
}

impl YahooPriceProvider {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    fn chart_url(
        &self,
        ticker: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Url, MarketDataError> {
        let malformed = |reason: String| MarketDataError::MalformedResponse {
            ticker: ticker.to_string(),
            reason,
        };

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| malformed(format!("invalid base URL '{}': {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| malformed(format!("base URL '{}' cannot take a path", self.base_url)))?
            .pop_if_empty()
            .push(ticker);
        url.query_pairs_mut()
            .append_pair("period1", &start.timestamp().to_string())
            .append_pair("period2", &end.timestamp().to_string())
            .append_pair("interval", "1d")
            .append_pair("includeAdjustedClose", "true");
        Ok(url)
    }

    fn parse_response(ticker: &str, resp: ChartResponse) -> Result<PriceSeries, MarketDataError> {
        if let Some(err) = resp.chart.error {
            return Err(if err.code == "Not Found" {
                MarketDataError::InvalidTicker {
                    ticker: ticker.to_string(),
                }
            } else {
                MarketDataError::MalformedResponse {
                    ticker: ticker.to_string(),
                    reason: format!("{}: {}", err.code, err.description),
                }
            });
        }

        let empty = || MarketDataError::Empty {
            ticker: ticker.to_string(),
        };

        let data = resp
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(empty)?;
        let timestamps = data.timestamp.ok_or_else(empty)?;

        let adjusted = data
            .indicators
            .adjclose
            .and_then(|v| v.into_iter().next())
            .map(|a| a.adjclose);
        let raw = data
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .unwrap_or_default();

        let mut rows: Vec<(i64, PricePoint)> = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let close = adjusted
                .as_ref()
                .and_then(|v| v.get(i).copied().flatten())
                .or_else(|| raw.get(i).copied().flatten());
            let Some(close) = close.filter(|c| c.is_finite()) else {
                continue;
            };
            let date = DateTime::from_timestamp(ts, 0)
                .map(|dt| dt.date_naive())
                .ok_or_else(|| MarketDataError::MalformedResponse {
                    ticker: ticker.to_string(),
                    reason: format!("invalid timestamp: {}", ts),
                })?;
            rows.push((ts, PricePoint::new(date, close)));
        }

        // Same-day rows keep the one with the latest timestamp.
        rows.sort_by_key(|(ts, _)| *ts);
        let mut deduped: Vec<PricePoint> = Vec::with_capacity(rows.len());
        for (_, point) in rows {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }

        if deduped.is_empty() {
            return Err(empty());
        }

        PriceSeries::new(deduped).map_err(|e| MarketDataError::MalformedResponse {
            ticker: ticker.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl PriceSeriesProvider for YahooPriceProvider {
    async fn fetch(&self, ticker: &str, lookback_days: u32) -> Result<PriceSeries, MarketDataError> {
        let end = Utc::now();
        let start = end - ChronoDuration::days(i64::from(lookback_days));
        let url = self.chart_url(ticker, start, end)?;

        debug!(ticker = %ticker, url = %url, "Fetching daily prices for {}", ticker);

        let response = self.client.get(url).send().await.map_err(|e| {
            MarketDataError::Unreachable {
                ticker: ticker.to_string(),
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(MarketDataError::InvalidTicker {
                ticker: ticker.to_string(),
            });
        }
        if !status.is_success() {
            return Err(MarketDataError::Unreachable {
                ticker: ticker.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        let chart: ChartResponse =
            response
                .json()
                .await
                .map_err(|e| MarketDataError::MalformedResponse {
                    ticker: ticker.to_string(),
                    reason: e.to_string(),
                })?;

        let series = Self::parse_response(ticker, chart)?;
        debug!(
            ticker = %ticker,
            count = series.len(),
            "Fetched {} daily closes for {}",
            series.len(),
            ticker
        );
        Ok(series)
    }
}
