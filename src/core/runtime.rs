//! One scheduled run: fetch → evaluate → format → dispatch.

use crate::config::AlertConfig;
use crate::models::signal::{Signal, TickerReport};
use crate::report::formatter::{FormattedReport, ReportFormatter};
use crate::services::error::DeliveryError;
use crate::services::mailer::AlertDispatcher;
use crate::services::market_data::PriceSeriesProvider;
use crate::signals::engine::SignalEngine;
use chrono::NaiveDate;
use futures_util::future::join_all;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("no market data for any of the {count} configured ticker(s)")]
    AllTickersUnavailable { count: usize },

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub entries: Vec<TickerReport>,
    pub report: FormattedReport,
}

impl RunSummary {
    pub fn count(&self, signal: Signal) -> usize {
        self.entries
            .iter()
            .filter(|e| e.signal() == Some(signal))
            .count()
    }

    pub fn no_data_count(&self) -> usize {
        self.entries.iter().filter(|e| e.signal().is_none()).count()
    }
}

/// Runs the daily alert pipeline against injected collaborators.
pub struct AlertRuntime {
    config: AlertConfig,
    provider: Arc<dyn PriceSeriesProvider + Send + Sync>,
    dispatcher: Arc<dyn AlertDispatcher + Send + Sync>,
}

impl AlertRuntime {
    pub fn new(
        config: AlertConfig,
        provider: Arc<dyn PriceSeriesProvider + Send + Sync>,
        dispatcher: Arc<dyn AlertDispatcher + Send + Sync>,
    ) -> Self {
        Self {
            config,
            provider,
            dispatcher,
        }
    }

    /// Evaluate every configured ticker, keeping configured order.
    ///
    /// Per-ticker failures become "no data" rows; tickers run concurrently
    /// and share nothing.
    pub async fn collect_reports(&self) -> Vec<TickerReport> {
        let tasks = self
            .config
            .tickers
            .iter()
            .map(|ticker| self.evaluate_ticker(ticker));
        join_all(tasks).await
    }

    async fn evaluate_ticker(&self, ticker: &str) -> TickerReport {
        info!(ticker = %ticker, "Analyzing {}", ticker);

        let series = match self.provider.fetch(ticker, self.config.lookback_days).await {
            Ok(series) => series,
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "Failed to fetch data for {}", ticker);
                return TickerReport::no_data(ticker, e.reason());
            }
        };

        match SignalEngine::evaluate(ticker, &series, &self.config.params) {
            Ok(result) => {
                debug!(
                    ticker = %ticker,
                    signal = %result.signal,
                    fast_ema = result.fast_ema,
                    slow_ema = result.slow_ema,
                    "Evaluated {}: {}",
                    ticker,
                    result.signal
                );
                TickerReport::Signal(result)
            }
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "Cannot evaluate {}", ticker);
                TickerReport::no_data(ticker, e.reason())
            }
        }
    }

    /// Execute one run for `report_date`.
    ///
    /// The report is sent even when every ticker is unavailable; the run is
    /// then still reported as failed.
    pub async fn run(&self, report_date: NaiveDate) -> Result<RunSummary, RunError> {
        info!(
            tickers = self.config.tickers.len(),
            fast = self.config.params.fast_period(),
            slow = self.config.params.slow_period(),
            "Starting ETF signal run for {}",
            report_date
        );

        let entries = self.collect_reports().await;
        let report = ReportFormatter::new(report_date, self.config.params).format(&entries);
        let summary = RunSummary { entries, report };

        info!(
            buy = summary.count(Signal::Buy),
            sell = summary.count(Signal::Sell),
            hold = summary.count(Signal::Hold),
            no_data = summary.no_data_count(),
            "Signals computed"
        );

        if let Err(e) = self
            .dispatcher
            .send(
                &self.config.recipients,
                &summary.report.subject,
                &summary.report.plain_text,
                &summary.report.html,
            )
            .await
        {
            error!(error = %e, "Failed to deliver report");
            return Err(RunError::Delivery(e));
        }

        let count = summary.entries.len();
        if count > 0 && summary.no_data_count() == count {
            return Err(RunError::AllTickersUnavailable { count });
        }

        Ok(summary)
    }
}
