//! Config - Application Configuration

use crate::constants::{DEFAULT_FLEET_SIZE, DEFAULT_PASSWORD, DEFAULT_USERNAME, TICK_INTERVAL_MS};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Fleet generation and telemetry ticking
    pub simulation: SimulationConfig,
    /// Logging options
    pub log: LogConfig,
}

impl AppConfig {
    /// Reject settings the simulator cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.simulation.tick_interval_ms == 0 {
            return Err(Error::Invalid {
                message: "simulation.tick_interval_ms must be greater than zero".to_string(),
            });
        }
        if self.simulation.fleet_size == 0 {
            return Err(Error::Invalid {
                message: "simulation.fleet_size must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Telemetry tick period in milliseconds
    pub tick_interval_ms: u64,
    /// Number of trucks generated on first dashboard entry
    pub fleet_size: usize,
    /// Fixed RNG seed; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl SimulationConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            fleet_size: DEFAULT_FLEET_SIZE,
            seed: None,
        }
    }
}

/// Login credentials accepted by the session gate
///
/// Fixed to the built-in fleet manager account; not read from the config file.
#[derive(Clone, PartialEq)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

impl AuthConfig {
    /// Exact, case-sensitive match of both fields
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default level directive when `RUST_LOG` is unset
    pub level: String,
    /// Also write a daily rolling log file in the data directory
    pub file: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: false,
        }
    }
}
