pub mod trend;
pub mod volatility;

pub use trend::{calculate_ema, calculate_ema_series};
pub use volatility::{calculate_volatility, VOLATILITY_WINDOW};
