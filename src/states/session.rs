//! Session Gate
//!
//! Finite state machine deciding which screen the user is on and when the
//! fleet is generated and simulated.
//!
//! ```text
//!            open              login ok
//! Landing ─────────► Login ─────────────► Dashboard
//!    ▲                 │                      │
//!    └──── cancel ─────┘                      │
//!    └─────────────────── logout ─────────────┘
//! ```
//!
//! Transitions are a pure table (`transition`) returning side effects; the
//! `SessionGate` runs those effects against the store and the data source.

use crate::domain::AuthConfig;
use crate::error::{Error, Result};
use crate::services::{FleetDataSource, TickHandle};
use crate::states::{FleetStore, UIEvent};
use crossbeam_channel::{Receiver, Sender};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Screens the session can be on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Landing,
    Login,
    Dashboard,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SessionState::Landing => "Landing",
            SessionState::Login => "Login",
            SessionState::Dashboard => "Dashboard",
        };
        f.write_str(label)
    }
}

/// User-initiated session events
#[derive(Clone, PartialEq, Eq)]
pub enum SessionEvent {
    OpenLogin,
    Cancel,
    Submit { username: String, password: String },
    Logout,
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::OpenLogin => "open login",
            SessionEvent::Cancel => "cancel",
            SessionEvent::Submit { .. } => "log in",
            SessionEvent::Logout => "log out",
        }
    }
}

impl std::fmt::Debug for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionEvent::Submit { username, .. } => f
                .debug_struct("Submit")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            other => f.write_str(other.name()),
        }
    }
}

/// Work the gate performs after a transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SideEffect {
    /// Generate the fleet if it does not exist yet
    EnsureFleet,
    /// Acquire the telemetry tick handle
    StartTelemetry,
    /// Release the telemetry tick handle
    StopTelemetry,
}

/// The transition table: (state, event) → (next state, side effects)
pub fn transition(
    state: SessionState,
    event: &SessionEvent,
    auth: &AuthConfig,
) -> Result<(SessionState, Vec<SideEffect>)> {
    use SessionState::*;

    match (state, event) {
        (Landing, SessionEvent::OpenLogin) => Ok((Login, Vec::new())),
        (Login, SessionEvent::Cancel) => Ok((Landing, Vec::new())),
        (Login, SessionEvent::Submit { username, password }) => {
            if auth.matches(username, password) {
                Ok((
                    Dashboard,
                    vec![SideEffect::EnsureFleet, SideEffect::StartTelemetry],
                ))
            } else {
                Err(Error::AuthenticationFailed {})
            }
        }
        (Dashboard, SessionEvent::Logout) => Ok((Landing, vec![SideEffect::StopTelemetry])),
        (state, event) => Err(Error::InvalidTransition {
            state,
            event: event.name(),
        }),
    }
}

/// Owner of the session state, the telemetry handle and the login error
pub struct SessionGate {
    state: SessionState,
    auth: AuthConfig,
    store: FleetStore,
    source: Arc<dyn FleetDataSource>,
    /// Present exactly while the state is `Dashboard`
    telemetry: Option<TickHandle>,
    login_error: Option<String>,
    session_id: Option<Uuid>,
    tx: Sender<UIEvent>,
    rx: Receiver<UIEvent>,
}

impl SessionGate {
    pub fn new(auth: AuthConfig, store: FleetStore, source: Arc<dyn FleetDataSource>) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            state: SessionState::Landing,
            auth,
            store,
            source,
            telemetry: None,
            login_error: None,
            session_id: None,
            tx,
            rx,
        }
    }

    // ==================== Getters ====================

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn store(&self) -> &FleetStore {
        &self.store
    }

    /// Inline error for the login screen, cleared on the next transition
    pub fn login_error(&self) -> Option<&str> {
        self.login_error.as_deref()
    }

    pub fn is_telemetry_active(&self) -> bool {
        self.telemetry.as_ref().is_some_and(TickHandle::is_active)
    }

    /// Dashboard session id, set while logged in
    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    /// Receiver for UI events
    pub fn events(&self) -> Receiver<UIEvent> {
        self.rx.clone()
    }

    // ==================== Transitions ====================

    pub fn open_login(&mut self) -> Result<SessionState> {
        self.dispatch(SessionEvent::OpenLogin)
    }

    pub fn cancel(&mut self) -> Result<SessionState> {
        self.dispatch(SessionEvent::Cancel)
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<SessionState> {
        self.dispatch(SessionEvent::Submit {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    pub fn logout(&mut self) -> Result<SessionState> {
        self.dispatch(SessionEvent::Logout)
    }

    /// Run one event through the table and apply its side effects
    ///
    /// On error the state is unchanged.
    pub fn dispatch(&mut self, event: SessionEvent) -> Result<SessionState> {
        let from = self.state;
        match transition(from, &event, &self.auth) {
            Ok((to, effects)) => {
                // Telemetry is fully stopped before the state leaves Dashboard.
                for effect in effects {
                    self.apply(effect);
                }
                self.state = to;
                self.login_error = None;
                info!(%from, %to, session = ?self.session_id, "Session transition");
                let _ = self.tx.send(UIEvent::SessionChanged { from, to });
                match &event {
                    SessionEvent::Submit { username, .. } => {
                        let _ = self.tx.send(UIEvent::info(format!("Signed in as {username}")));
                    }
                    SessionEvent::Logout => {
                        let _ = self.tx.send(UIEvent::info("Signed out"));
                    }
                    _ => {}
                }
                Ok(to)
            }
            Err(err @ Error::AuthenticationFailed {}) => {
                if let SessionEvent::Submit { username, .. } = &event {
                    warn!(%username, "Login rejected");
                }
                let message = err.to_string();
                let _ = self.tx.send(UIEvent::error(message.as_str()));
                self.login_error = Some(message);
                Err(err)
            }
            Err(err) => {
                warn!(state = %from, event = event.name(), "Ignored event");
                Err(err)
            }
        }
    }

    fn apply(&mut self, effect: SideEffect) {
        match effect {
            SideEffect::EnsureFleet => {
                self.store.ensure_loaded(self.source.as_ref());
            }
            SideEffect::StartTelemetry => {
                if self.telemetry.is_none() {
                    let store = self.store.clone();
                    self.telemetry = Some(
                        self.source
                            .subscribe(Box::new(move |trucks| store.apply_tick(trucks))),
                    );
                }
                self.session_id = Some(Uuid::new_v4());
            }
            SideEffect::StopTelemetry => {
                if let Some(handle) = self.telemetry.take() {
                    handle.cancel();
                }
                self.session_id = None;
            }
        }
    }
}

impl std::fmt::Debug for SessionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGate")
            .field("state", &self.state)
            .field("telemetry", &self.is_telemetry_active())
            .field("store", &self.store)
            .finish()
    }
}
