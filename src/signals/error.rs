use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignalError {
    #[error("insufficient data for {ticker}: {points} point(s), at least {required} required")]
    InsufficientData {
        ticker: String,
        points: usize,
        required: usize,
    },
}

impl SignalError {
    /// Short description without the ticker, used for report rows.
    pub fn reason(&self) -> String {
        match self {
            SignalError::InsufficientData {
                points, required, ..
            } => format!("insufficient data ({} of {} points)", points, required),
        }
    }
}
