//! Fleet Data Source
//!
//! The seam between the fleet store and wherever truck data comes from. The
//! in-process simulated source is one implementation; a hardware telemetry
//! feed would be another, with no change to the store or the session gate.

use crate::domain::{Fleet, SimulationConfig, Truck};
use crate::services::generator::FleetGenerator;
use crate::services::rng::SimRng;
use crate::services::simulator::TelemetrySimulator;
use crate::services::ticker::TickHandle;
use chrono::Local;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

/// Receives the full updated truck list after every tick
pub type TickCallback = Box<dyn FnMut(Vec<Truck>) + Send + 'static>;

/// Supplier of fleet data
pub trait FleetDataSource: Send + Sync {
    /// The initial fleet snapshot
    fn fetch_initial(&self) -> Fleet;

    /// Deliver updated trucks until the returned handle is cancelled or dropped
    fn subscribe(&self, on_tick: TickCallback) -> TickHandle;
}

struct SimState {
    rng: SimRng,
    fleet: Option<Fleet>,
    ticks: u64,
}

/// Randomized in-process source: generator for the snapshot, simulator for ticks
pub struct SimulatedSource {
    generator: FleetGenerator,
    simulator: TelemetrySimulator,
    period: Duration,
    runtime: Handle,
    state: Arc<Mutex<SimState>>,
}

impl SimulatedSource {
    /// Create a source from configuration
    pub fn new(config: &SimulationConfig, runtime: Handle) -> Self {
        Self::with_rng(
            FleetGenerator::new(config.fleet_size),
            config.tick_interval(),
            SimRng::from_config(config.seed),
            runtime,
        )
    }

    /// Create a source with an explicit RNG
    pub fn with_rng(
        generator: FleetGenerator,
        period: Duration,
        rng: SimRng,
        runtime: Handle,
    ) -> Self {
        Self {
            generator,
            simulator: TelemetrySimulator::new(),
            period,
            runtime,
            state: Arc::new(Mutex::new(SimState {
                rng,
                fleet: None,
                ticks: 0,
            })),
        }
    }

    /// Ticks applied so far
    pub fn tick_count(&self) -> u64 {
        self.state.lock().ticks
    }
}

impl FleetDataSource for SimulatedSource {
    fn fetch_initial(&self) -> Fleet {
        let mut state = self.state.lock();
        let SimState { rng, fleet, .. } = &mut *state;
        fleet
            .get_or_insert_with(|| self.generator.generate(rng, &Local::now()))
            .clone()
    }

    fn subscribe(&self, mut on_tick: TickCallback) -> TickHandle {
        let state = self.state.clone();
        let simulator = self.simulator;

        TickHandle::spawn(&self.runtime, "telemetry", self.period, move || {
            let trucks = {
                let mut guard = state.lock();
                let SimState { rng, fleet, ticks } = &mut *guard;
                let Some(fleet) = fleet.as_mut() else {
                    return;
                };
                let report = simulator.tick(fleet, rng);
                *ticks += 1;
                tracing::debug!(
                    tick = *ticks,
                    updated = report.updated,
                    refueled = report.refueled.len(),
                    "Telemetry tick"
                );
                fleet.trucks().cloned().collect::<Vec<_>>()
            };
            on_tick(trucks);
        })
    }
}

impl std::fmt::Debug for SimulatedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedSource")
            .field("generator", &self.generator)
            .field("period", &self.period)
            .field("ticks", &self.tick_count())
            .finish()
    }
}
