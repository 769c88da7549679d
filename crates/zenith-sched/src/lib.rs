//! Body priority ordering and the time-budgeted precompute driver.
#![forbid(unsafe_code)]

mod driver;
mod order;

pub use driver::{PrecalcReport, precalculate};
pub use order::{compare_priority, priority_order};
