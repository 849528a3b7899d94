//! Signal evaluation: crossover rule, accumulation zones and the per-ticker engine.

pub mod crossover;
pub mod engine;
pub mod error;
pub mod zone;

pub use crossover::derive_signal;
pub use engine::{SignalEngine, MIN_POINTS};
pub use error::SignalError;
pub use zone::{assess_zone, VOLATILITY_THRESHOLD, ZONE_EMA_PERIODS};
