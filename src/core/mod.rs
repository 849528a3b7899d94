//! Run orchestration

pub mod runtime;

pub use runtime::*;
