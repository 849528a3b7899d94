pub mod calendar;
pub mod math;
