//! External collaborators: market data and email delivery.

pub mod error;
pub mod mailer;
pub mod market_data;
pub mod yahoo;

pub use error::{DeliveryError, MarketDataError};
pub use mailer::{AlertDispatcher, SmtpDispatcher, SmtpSettings};
pub use market_data::PriceSeriesProvider;
pub use yahoo::{YahooPriceProvider, DEFAULT_CHART_URL};
