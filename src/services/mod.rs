//! Service Layer
//!
//! Produces fleet data and drives it over time. The state layer only sees the
//! `FleetDataSource` seam.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     SimulatedSource                          │
//! │  ┌────────────────┐  ┌───────────────────┐  ┌────────────┐  │
//! │  │ FleetGenerator │  │TelemetrySimulator │  │ TickHandle │  │
//! │  │  (snapshot)    │  │   (drain step)    │  │  (period)  │  │
//! │  └────────────────┘  └───────────────────┘  └────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼ Vec<Truck> per tick
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      State Layer                             │
//! │                (FleetStore, SessionGate)                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod generator;
mod rng;
mod runtime;
mod simulator;
mod source;
mod ticker;

pub use generator::*;
pub use rng::*;
pub use runtime::*;
pub use simulator::*;
pub use source::*;
pub use ticker::*;
