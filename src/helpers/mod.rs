//! Helper Utilities
//!
//! Common utilities used across the application.

mod fixed_series;
mod fs;

pub use fixed_series::*;
pub use fs::*;
