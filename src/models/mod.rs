//! Shared data models passed between the run stages.

pub mod price;
pub mod signal;
pub mod zone;

pub use price::{PricePoint, PriceSeries, SeriesError};
pub use signal::{IndicatorParameters, ParameterError, Signal, SignalResult, TickerReport};
pub use zone::{EmaLevel, Zone, ZoneAssessment};
