//! Fleet Store
//!
//! Single source of truth for the fleet and the current truck selection.
//! The fleet is built once, on first dashboard entry, and then only replaced
//! wholesale by telemetry ticks. Readers get an `Arc<Fleet>` snapshot, so a
//! reader sees either the fleet before a tick or after it, never in between.

use crate::domain::{Fleet, Truck, TruckId};
use crate::services::FleetDataSource;
use crossbeam_channel::{Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// Notifications for store observers
#[derive(Clone, Debug, PartialEq)]
pub enum FleetEvent {
    /// The fleet was generated
    Loaded { trucks: usize },
    /// A telemetry tick was applied
    Ticked { tick: u64 },
    /// The selected truck id changed
    SelectionChanged { id: TruckId },
}

#[derive(Default)]
struct FleetSlot {
    fleet: Option<Arc<Fleet>>,
    ticks: u64,
    loads: u64,
}

struct StoreInner {
    /// Fleet snapshot; ticks hold the write lock for the whole update
    fleet: RwLock<FleetSlot>,
    /// Kept apart from the fleet so selecting never waits on a tick
    selected: Mutex<Option<TruckId>>,
    subscribers: Mutex<Vec<Sender<FleetEvent>>>,
}

/// Shared handle to the fleet store
#[derive(Clone)]
pub struct FleetStore {
    inner: Arc<StoreInner>,
}

impl FleetStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                fleet: RwLock::new(FleetSlot::default()),
                selected: Mutex::new(None),
                subscribers: Mutex::new(Vec::new()),
            }),
        }
    }

    // ==================== Loading ====================

    /// Build the fleet from `source` unless it already exists
    ///
    /// Returns `true` when the fleet was generated by this call. The first
    /// truck becomes the selection.
    pub fn ensure_loaded(&self, source: &dyn FleetDataSource) -> bool {
        let trucks = {
            let mut slot = self.inner.fleet.write();
            if slot.fleet.is_some() {
                return false;
            }
            let fleet = source.fetch_initial();
            if let Some(first) = fleet.first() {
                *self.inner.selected.lock() = Some(first.id.clone());
            }
            let trucks = fleet.len();
            slot.fleet = Some(Arc::new(fleet));
            slot.loads += 1;
            trucks
        };

        tracing::info!(trucks, "Fleet loaded");
        self.notify(FleetEvent::Loaded { trucks });
        true
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.fleet.read().fleet.is_some()
    }

    // ==================== Ticks ====================

    /// Replace trucks with their ticked versions in one step
    ///
    /// Ignored before the fleet exists.
    pub fn apply_tick(&self, trucks: Vec<Truck>) {
        let tick = {
            let mut slot = self.inner.fleet.write();
            let Some(fleet) = slot.fleet.as_mut() else {
                return;
            };
            Arc::make_mut(fleet).apply_updates(trucks);
            slot.ticks += 1;
            slot.ticks
        };
        self.notify(FleetEvent::Ticked { tick });
    }

    // ==================== Getters ====================

    /// Consistent view of the whole fleet, `None` before generation
    pub fn snapshot(&self) -> Option<Arc<Fleet>> {
        self.inner.fleet.read().fleet.clone()
    }

    /// Ticks applied since the fleet was loaded
    pub fn tick_count(&self) -> u64 {
        self.inner.fleet.read().ticks
    }

    /// How many times the fleet has been generated (0 or 1)
    pub fn load_count(&self) -> u64 {
        self.inner.fleet.read().loads
    }

    /// Raw selected id, which may not resolve
    pub fn selected_id(&self) -> Option<TruckId> {
        self.inner.selected.lock().clone()
    }

    /// The selected truck, falling back to the first truck in creation order
    ///
    /// `None` only while the fleet is absent or empty.
    pub fn current(&self) -> Option<Truck> {
        let fleet = self.snapshot()?;
        let selected = self.selected_id();
        resolve_selection(&fleet, selected.as_ref()).cloned()
    }

    // ==================== Setters ====================

    /// Select a truck by id; the id is not checked against the fleet
    pub fn select(&self, id: impl Into<TruckId>) {
        let id = id.into();
        *self.inner.selected.lock() = Some(id.clone());
        tracing::debug!(truck = %id, "Selected truck");
        self.notify(FleetEvent::SelectionChanged { id });
    }

    // ==================== Subscriptions ====================

    /// Receive store events; dropping the receiver unsubscribes
    pub fn subscribe(&self) -> Receiver<FleetEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.inner.subscribers.lock().push(tx);
        rx
    }

    fn notify(&self, event: FleetEvent) {
        self.inner
            .subscribers
            .lock()
            .retain(|tx| tx.send(event.clone()).is_ok());
    }
}

impl Default for FleetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FleetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = self.inner.fleet.read();
        f.debug_struct("FleetStore")
            .field("trucks", &slot.fleet.as_ref().map(|fleet| fleet.len()))
            .field("ticks", &slot.ticks)
            .field("selected", &*self.inner.selected.lock())
            .finish()
    }
}

/// Resolve a selection against a fleet, falling back to the first truck
pub fn resolve_selection<'a>(fleet: &'a Fleet, selected: Option<&TruckId>) -> Option<&'a Truck> {
    match selected.and_then(|id| fleet.get(id)) {
        Some(truck) => Some(truck),
        None => {
            if let Some(id) = selected {
                tracing::debug!(truck = %id, "Stale selection, falling back to first truck");
            }
            fleet.first()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TruckStatus;
    use crate::domain::truck::fixtures::truck;
    use crate::services::{TickCallback, TickHandle};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Source with a fixed fleet that counts how often it was asked for one
    struct StaticSource {
        fleet: Fleet,
        fetches: AtomicUsize,
    }

    impl StaticSource {
        fn new(ids: &[&str]) -> Self {
            Self {
                fleet: ids
                    .iter()
                    .map(|id| truck(id, TruckStatus::Moving, 60.0))
                    .collect(),
                fetches: AtomicUsize::new(0),
            }
        }
    }

    impl FleetDataSource for StaticSource {
        fn fetch_initial(&self) -> Fleet {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.fleet.clone()
        }

        fn subscribe(&self, _on_tick: TickCallback) -> TickHandle {
            unreachable!("store tests never subscribe")
        }
    }

    fn loaded_store() -> FleetStore {
        let store = FleetStore::new();
        store.ensure_loaded(&StaticSource::new(&["TRK-101", "TRK-102", "TRK-103"]));
        store
    }

    #[test]
    fn test_empty_store() {
        let store = FleetStore::new();
        assert!(!store.is_loaded());
        assert!(store.snapshot().is_none());
        assert!(store.current().is_none());
        // Ticks before generation are dropped.
        store.apply_tick(vec![truck("TRK-101", TruckStatus::Moving, 10.0)]);
        assert_eq!(store.tick_count(), 0);
    }

    #[test]
    fn test_loads_once_and_selects_first() {
        let store = FleetStore::new();
        let source = StaticSource::new(&["TRK-101", "TRK-102"]);

        assert!(store.ensure_loaded(&source));
        assert!(!store.ensure_loaded(&source));

        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
        assert_eq!(store.load_count(), 1);
        assert_eq!(store.selected_id(), Some(TruckId::from("TRK-101")));
    }

    #[test]
    fn test_select_resolves_and_falls_back() {
        let store = loaded_store();

        store.select("TRK-102");
        assert_eq!(store.current().map(|t| t.id), Some(TruckId::from("TRK-102")));

        store.select("does-not-exist");
        assert_eq!(store.selected_id(), Some(TruckId::from("does-not-exist")));
        assert_eq!(store.current().map(|t| t.id), Some(TruckId::from("TRK-101")));
    }

    #[test]
    fn test_empty_fleet_has_no_current_truck() {
        let store = FleetStore::new();
        store.ensure_loaded(&StaticSource::new(&[]));
        assert!(store.is_loaded());
        assert!(store.selected_id().is_none());
        assert!(store.current().is_none());
    }

    #[test]
    fn test_tick_replaces_snapshot_atomically() {
        let store = loaded_store();
        let before = store.snapshot().expect("snapshot");

        store.apply_tick(vec![
            truck("TRK-101", TruckStatus::Moving, 59.8),
            truck("TRK-103", TruckStatus::Moving, 59.7),
        ]);

        // The old snapshot is untouched; the new one has every update.
        let levels = |fleet: &Fleet| fleet.trucks().map(|t| t.fuel_level).collect::<Vec<_>>();
        assert_eq!(levels(&before), vec![60.0, 60.0, 60.0]);
        let after = store.snapshot().expect("snapshot");
        assert_eq!(levels(&after), vec![59.8, 60.0, 59.7]);
        assert_eq!(store.tick_count(), 1);
    }

    #[test]
    fn test_selection_does_not_change_fleet() {
        let store = loaded_store();
        let before = store.snapshot().expect("snapshot");
        store.select("TRK-103");
        let after = store.snapshot().expect("snapshot");
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_subscribers_receive_events_in_order() {
        let store = FleetStore::new();
        let rx = store.subscribe();
        let dropped = store.subscribe();
        drop(dropped);

        store.ensure_loaded(&StaticSource::new(&["TRK-101"]));
        store.select("TRK-101");
        store.apply_tick(vec![truck("TRK-101", TruckStatus::Moving, 59.9)]);

        let events: Vec<FleetEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                FleetEvent::Loaded { trucks: 1 },
                FleetEvent::SelectionChanged { id: "TRK-101".into() },
                FleetEvent::Ticked { tick: 1 },
            ]
        );
        assert_eq!(store.inner.subscribers.lock().len(), 1);
    }

    #[test]
    fn test_concurrent_readers_see_whole_ticks() {
        let store = loaded_store();
        let writer = {
            let store = store.clone();
            std::thread::spawn(move || {
                for step in 1..=200 {
                    let level = 60.0 - f64::from(step) * 0.1;
                    store.apply_tick(
                        ["TRK-101", "TRK-102", "TRK-103"]
                            .iter()
                            .map(|id| truck(id, TruckStatus::Moving, level))
                            .collect(),
                    );
                }
            })
        };

        for _ in 0..200 {
            let fleet = store.snapshot().expect("snapshot");
            let levels: Vec<f64> = fleet.trucks().map(|t| t.fuel_level).collect();
            assert!(levels.windows(2).all(|w| w[0] == w[1]), "partial tick: {levels:?}");
        }
        writer.join().expect("writer thread");
        assert_eq!(store.tick_count(), 200);
    }
}
