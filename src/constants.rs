//! Fleet Constants
//!
//! Centralized constants for fleet generation, simulation and display.

/// Number of hourly points kept per truck (12 hours back plus the current hour)
pub const HISTORY_LEN: usize = 13;

/// Default number of trucks in a generated fleet
pub const DEFAULT_FLEET_SIZE: usize = 5;

/// Telemetry tick period
pub const TICK_INTERVAL_MS: u64 = 2000;

/// First truck number; ids are `TRK-<TRUCK_ID_BASE + n>`
pub const TRUCK_ID_BASE: usize = 100;

/// Tank size shared by every generated truck, in gallons
pub const TRUCK_CAPACITY_GAL: f64 = 300.0;

/// Starting fuel level range, percent
pub const START_LEVEL_MIN: f64 = 65.0;
pub const START_LEVEL_MAX: f64 = 85.0;

/// Hourly consumption draw upper bound, gal/hr
pub const MAX_CONSUMPTION_RATE: f64 = 5.0;

/// Efficiency range, miles per gallon
pub const MPG_MIN: f64 = 6.5;
pub const MPG_SPREAD: f64 = 2.0;

/// Per-tick drain, percentage points
pub const IDLE_DRAIN_RATE: f64 = 0.05;
pub const MOVING_DRAIN_RATE: f64 = 0.15;
pub const DRAIN_JITTER: f64 = 0.05;

/// Level a truck is reset to when it would otherwise run dry
pub const REFUEL_LEVEL: f64 = 100.0;

/// Below this level a truck is flagged as low on fuel
pub const LOW_FUEL_THRESHOLD: f64 = 20.0;

/// Display label for freshly generated trucks
pub const LAST_UPDATED_LABEL: &str = "Just now";

/// Round-robin tables for generated trucks
pub const DRIVERS: [&str; 5] = ["John D.", "Sarah C.", "Mike R.", "Lisa M.", "Tom B."];
pub const LOCATIONS: [&str; 5] = [
    "I-40 Westbound",
    "Dallas Depot",
    "Route 66",
    "Phoenix Yard",
    "I-5 Northbound",
];

/// Default demo credentials
pub const DEFAULT_USERNAME: &str = "fleetmanager";
pub const DEFAULT_PASSWORD: &str = "orca123";

/// Application name used for config/data directories and log files
pub const APP_NAME: &str = "orca-fleet";
