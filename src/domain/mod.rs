//! Domain - Pure Data Structures
//!
//! These types don't depend on the runtime and represent the fleet domain.

pub mod config;
pub mod metrics;
pub mod truck;

pub use config::*;
pub use metrics::*;
pub use truck::*;
