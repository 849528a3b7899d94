//! Daily ETF EMA-crossover alerts.
//!
//! One invocation fetches daily closes for the configured tickers, evaluates a
//! fast/slow EMA crossover per ticker and emails a plain-text + HTML summary.

pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod report;
pub mod services;
pub mod signals;
