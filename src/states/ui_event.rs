//! UI Events
//!
//! Events emitted from the state layer to whatever front-end is attached, for
//! inline errors, toasts and screen changes.

use crate::states::SessionState;
use std::sync::Arc;

/// UI events for user feedback
#[derive(Clone, Debug, PartialEq)]
pub enum UIEvent {
    /// Display a toast notification
    Toast {
        /// Message to display
        message: Arc<str>,
        /// Whether this is an error (affects styling)
        is_error: bool,
    },

    /// The session moved to another screen
    SessionChanged {
        from: SessionState,
        to: SessionState,
    },
}

impl UIEvent {
    pub fn info(message: impl Into<Arc<str>>) -> Self {
        Self::Toast {
            message: message.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl Into<Arc<str>>) -> Self {
        Self::Toast {
            message: message.into(),
            is_error: true,
        }
    }
}
