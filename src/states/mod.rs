//! State Management Layer
//!
//! Centralized application state. Follows a unidirectional data flow pattern:
//!
//! ```text
//! User Command → SessionGate → FleetStore ◄── Tick (FleetDataSource)
//!                                  │
//!                                  ▼ FleetEvent
//!                              View Refresh
//! ```

mod fleet;
mod session;
mod ui_event;

pub use fleet::*;
pub use session::*;
pub use ui_event::*;
