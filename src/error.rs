//! Error types for Orca Fleet
//!
//! Centralized error handling using snafu for ergonomic error definitions.

use crate::states::SessionState;
use snafu::Snafu;

/// Main error type for the application
#[derive(Debug, Snafu)]
pub enum Error {
    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// IO error (config file, stdin, log directory)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },

    /// Wrong username/password pair at the login screen
    #[snafu(display("Invalid username or password."))]
    AuthenticationFailed {},

    /// The session gate has no transition for this event in its current state
    #[snafu(display("Cannot {event} while on the {state} screen"))]
    InvalidTransition {
        state: SessionState,
        event: &'static str,
    },

    /// Platform config/data directories could not be resolved
    #[snafu(display("Could not determine project directories"))]
    ConfigDir {},
}

impl Error {
    /// Whether the error is meant to be shown inline to the user and retried
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::AuthenticationFailed { .. } | Error::InvalidTransition { .. } | Error::Invalid { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
