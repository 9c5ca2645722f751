//! Application - Console Front-End
//!
//! Wires config, store, data source and session gate together, then drives
//! them from stdin one command per line.

use std::sync::Arc;

use crate::app::command::{Command, HELP};
use crate::domain::{AppConfig, AuthConfig};
use crate::error::{Error, Result};
use crate::services::{SimulatedSource, block_on, runtime_handle};
use crate::states::{FleetEvent, FleetStore, SessionGate, SessionState, UIEvent};
use crate::views::dashboard::{
    render_dashboard, render_landing, render_loading, render_login, render_search, render_summary,
    render_truck_panel,
};
use crossbeam_channel::Receiver;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

/// What the loop should do after a command
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Print(String),
    Quit,
}

/// Session gate plus the receivers the console drains between commands
pub struct Console {
    gate: SessionGate,
    ui_events: Receiver<UIEvent>,
    fleet_events: Receiver<FleetEvent>,
    last_tick: u64,
}

impl Console {
    pub fn new(gate: SessionGate) -> Self {
        let ui_events = gate.events();
        let fleet_events = gate.store().subscribe();
        Self {
            gate,
            ui_events,
            fleet_events,
            last_tick: 0,
        }
    }

    /// Build the console from configuration with the simulated data source
    pub fn from_config(config: &AppConfig) -> Self {
        let store = FleetStore::new();
        let source = SimulatedSource::new(&config.simulation, runtime_handle());
        Self::new(SessionGate::new(AuthConfig::default(), store, Arc::new(source)))
    }

    pub fn gate(&self) -> &SessionGate {
        &self.gate
    }

    /// Current screen
    pub fn render(&self) -> String {
        match self.gate.state() {
            SessionState::Landing => render_landing(),
            SessionState::Login => render_login(self.gate.login_error()),
            SessionState::Dashboard => render_dashboard(self.gate.store()),
        }
    }

    /// Run one line of input
    ///
    /// Recoverable errors become printed messages; anything else is returned.
    pub fn handle_line(&mut self, line: &str) -> Result<Outcome> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(err) => return Ok(Outcome::Print(err.to_string())),
        };
        match self.execute(command) {
            Err(err) if err.is_recoverable() => Ok(Outcome::Print(self.error_view(&err))),
            other => other,
        }
    }

    fn execute(&mut self, command: Command) -> Result<Outcome> {
        debug!(?command, state = %self.gate.state(), "Console command");

        let output = match command {
            Command::Quit => return Ok(Outcome::Quit),
            Command::Help => HELP.to_string(),
            Command::Open => {
                self.gate.open_login()?;
                self.render()
            }
            Command::Cancel => {
                self.gate.cancel()?;
                self.render()
            }
            Command::Login { username, password } => {
                self.gate.login(&username, &password)?;
                self.render()
            }
            Command::Logout => {
                self.gate.logout()?;
                self.render()
            }
            Command::List => {
                self.require_dashboard()?;
                self.render()
            }
            Command::Select(id) => {
                self.require_dashboard()?;
                let known = self
                    .gate
                    .store()
                    .snapshot()
                    .is_some_and(|fleet| fleet.get(&id.as_str().into()).is_some());
                if !known {
                    warn!(id = %id, "Selected unknown truck id");
                }
                self.gate.store().select(id);
                self.render()
            }
            Command::Show => {
                self.require_dashboard()?;
                self.selected_panel()
            }
            Command::Search(query) => {
                self.require_dashboard()?;
                match self.gate.store().snapshot() {
                    Some(fleet) => render_search(&query, &fleet.search(&query)),
                    None => render_loading(),
                }
            }
            Command::Summary => {
                self.require_dashboard()?;
                match self.gate.store().snapshot() {
                    Some(fleet) => render_summary(&fleet),
                    None => render_loading(),
                }
            }
            Command::Json => {
                self.require_dashboard()?;
                match self.gate.store().current() {
                    Some(truck) => serde_json::to_string_pretty(&truck)?,
                    None => render_loading(),
                }
            }
        };
        Ok(Outcome::Print(output))
    }

    fn selected_panel(&self) -> String {
        let store = self.gate.store();
        match (store.snapshot(), store.current()) {
            (Some(fleet), Some(truck)) => render_truck_panel(&truck, &fleet),
            _ => render_loading(),
        }
    }

    fn require_dashboard(&self) -> Result<()> {
        match self.gate.state() {
            SessionState::Dashboard => Ok(()),
            _ => Err(Error::Invalid {
                message: "log in to view the fleet".to_string(),
            }),
        }
    }

    fn error_view(&self, err: &Error) -> String {
        match err {
            Error::AuthenticationFailed {} => self.render(),
            other => other.to_string(),
        }
    }

    /// Drain pending notifications, returning lines worth printing
    pub fn drain_events(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        for event in self.ui_events.try_iter() {
            match event {
                UIEvent::Toast {
                    message,
                    is_error: false,
                } => lines.push(format!("* {message}")),
                // errors are already shown inline by the login view
                UIEvent::Toast { is_error: true, .. } => {}
                UIEvent::SessionChanged { from, to } => debug!(%from, %to, "Screen changed"),
            }
        }
        for event in self.fleet_events.try_iter() {
            match event {
                FleetEvent::Loaded { trucks } => lines.push(format!("* Loaded {trucks} trucks")),
                FleetEvent::Ticked { tick } => self.last_tick = tick,
                FleetEvent::SelectionChanged { id } => debug!(%id, "Selection changed"),
            }
        }
        lines
    }

    pub fn last_tick(&self) -> u64 {
        self.last_tick
    }

    fn prompt(&self) -> String {
        match self.gate.state() {
            SessionState::Dashboard => format!("[tick {}] > ", self.last_tick),
            state => format!("[{state}] > "),
        }
    }
}

/// Run the console until `quit` or end of input
pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    block_on(async move {
        let mut console = Console::from_config(&config);
        info!(
            fleet_size = config.simulation.fleet_size,
            tick_ms = config.simulation.tick_interval_ms,
            seeded = config.simulation.seed.is_some(),
            "Console ready"
        );

        println!("{}\n", console.render());
        print_prompt(&console.prompt());

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                print_prompt(&console.prompt());
                continue;
            }
            let outcome = console.handle_line(&line)?;
            for note in console.drain_events() {
                println!("{note}");
            }
            match outcome {
                Outcome::Quit => break,
                Outcome::Print(text) => println!("{text}\n"),
            }
            print_prompt(&console.prompt());
        }

        info!("Console closed");
        Ok(())
    })
}

fn print_prompt(prompt: &str) {
    use std::io::Write;
    print!("{prompt}");
    let _ = std::io::stdout().flush();
}
