//! Report rendering for the email body and subject.

pub mod formatter;

pub use formatter::{FormattedReport, ReportFormatter, NO_SIGNALS};
