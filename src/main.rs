//! ETF Alert
//!
//! Runs once per scheduled trigger: fetch prices, evaluate EMA crossovers,
//! email the report, exit. Non-zero exit on configuration, data or delivery failure.

use chrono::Local;
use dotenvy::dotenv;
use etf_alert::config::{get_environment, AlertConfig};
use etf_alert::core::runtime::AlertRuntime;
use etf_alert::logging;
use etf_alert::services::mailer::{AlertDispatcher, SmtpDispatcher};
use etf_alert::services::market_data::PriceSeriesProvider;
use etf_alert::services::yahoo::YahooPriceProvider;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    info!(environment = %get_environment(), "Starting ETF alert run");

    let config = match AlertConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let provider: Arc<dyn PriceSeriesProvider + Send + Sync> =
        match YahooPriceProvider::new(config.market_data_url.clone()) {
            Ok(provider) => Arc::new(provider),
            Err(e) => {
                error!(error = %e, "Failed to build HTTP client");
                return ExitCode::FAILURE;
            }
        };

    let dispatcher: Arc<dyn AlertDispatcher + Send + Sync> = match SmtpDispatcher::new(&config.smtp)
    {
        Ok(dispatcher) => Arc::new(dispatcher),
        Err(e) => {
            error!(error = %e, "Failed to configure SMTP transport");
            return ExitCode::FAILURE;
        }
    };

    let runtime = AlertRuntime::new(config, provider, dispatcher);
    let today = Local::now().date_naive();

    match runtime.run(today).await {
        Ok(summary) => {
            info!(
                entries = summary.entries.len(),
                subject = %summary.report.subject,
                "Run completed"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Run failed");
            ExitCode::FAILURE
        }
    }
}
