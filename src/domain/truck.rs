//! Truck - Fleet Vehicle and Fuel History

use crate::helpers::FixedSeries;
use ahash::RandomState;
use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Unique identifier for a truck (`TRK-<n>`)
#[derive(Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TruckId(pub Arc<str>);

impl TruckId {
    /// Create a new TruckId from a string
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    /// Id of the `n`-th generated truck
    pub fn numbered(n: usize) -> Self {
        Self::new(format!("TRK-{n}"))
    }

    /// Get the underlying string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TruckId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TruckId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for TruckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

/// Operating status, fixed when the truck is created
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TruckStatus {
    Moving,
    Idling,
    Stopped,
}

impl TruckStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TruckStatus::Moving => "Moving",
            TruckStatus::Idling => "Idling",
            TruckStatus::Stopped => "Stopped",
        }
    }
}

impl std::fmt::Display for TruckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One hourly fuel sample
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelDataPoint {
    /// Hour label, e.g. `"14:00"`
    pub time: String,
    /// Tank level, percent (0-100)
    pub level: u8,
    /// Consumption during the hour, gal/hr
    pub consumption_rate: f64,
}

/// Hourly fuel history, oldest first; its length never changes
pub type FuelHistory = FixedSeries<FuelDataPoint>;

/// A monitored truck
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    pub id: TruckId,
    pub name: String,
    pub driver: String,
    pub status: TruckStatus,
    /// Tank level, percent in (0, 100]; written only by the simulator
    pub fuel_level: f64,
    /// Tank capacity, gallons
    pub capacity: f64,
    pub current_mpg: f64,
    pub location: String,
    pub history: FuelHistory,
    pub last_updated: String,
}

/// The fleet: trucks keyed by id, iterated in creation order
#[derive(Clone, Debug, Default)]
pub struct Fleet {
    trucks: LinkedHashMap<TruckId, Truck, RandomState>,
}

impl Fleet {
    pub fn new() -> Self {
        Self {
            trucks: LinkedHashMap::with_hasher(RandomState::new()),
        }
    }

    /// Add a truck at the end of the creation order
    ///
    /// A truck whose id is already present replaces the existing entry in place.
    pub fn insert(&mut self, truck: Truck) {
        if let Some(existing) = self.trucks.get_mut(&truck.id) {
            *existing = truck;
        } else {
            self.trucks.insert(truck.id.clone(), truck);
        }
    }

    /// Replace known trucks with updated copies, ignoring unknown ids
    ///
    /// Returns the number of trucks replaced.
    pub fn apply_updates(&mut self, updates: impl IntoIterator<Item = Truck>) -> usize {
        let mut replaced = 0;
        for truck in updates {
            if let Some(existing) = self.trucks.get_mut(&truck.id) {
                *existing = truck;
                replaced += 1;
            }
        }
        replaced
    }

    pub fn get(&self, id: &TruckId) -> Option<&Truck> {
        self.trucks.get(id)
    }

    pub(crate) fn trucks_mut(&mut self) -> impl Iterator<Item = &mut Truck> {
        self.trucks.values_mut()
    }

    /// First truck in creation order
    pub fn first(&self) -> Option<&Truck> {
        self.trucks.front().map(|(_, truck)| truck)
    }

    /// Trucks in creation order
    pub fn trucks(&self) -> impl Iterator<Item = &Truck> {
        self.trucks.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &TruckId> {
        self.trucks.keys()
    }

    pub fn len(&self) -> usize {
        self.trucks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trucks.is_empty()
    }

    /// Case-insensitive search over id, name, driver and location
    pub fn search<'a>(&'a self, query: &str) -> Vec<&'a Truck> {
        let needle = query.trim().to_lowercase();
        self.trucks()
            .filter(|truck| {
                needle.is_empty()
                    || [
                        truck.id.as_str(),
                        truck.name.as_str(),
                        truck.driver.as_str(),
                        truck.location.as_str(),
                    ]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect()
    }
}

impl PartialEq for Fleet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.trucks().zip(other.trucks()).all(|(a, b)| a == b)
    }
}

impl FromIterator<Truck> for Fleet {
    fn from_iter<I: IntoIterator<Item = Truck>>(iter: I) -> Self {
        let mut fleet = Fleet::new();
        for truck in iter {
            fleet.insert(truck);
        }
        fleet
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A truck with a flat 13-point history at its current level
    pub fn truck(id: &str, status: TruckStatus, fuel_level: f64) -> Truck {
        let history = (0..crate::constants::HISTORY_LEN)
            .map(|h| FuelDataPoint {
                time: format!("{h}:00"),
                level: fuel_level.round() as u8,
                consumption_rate: 1.5,
            })
            .collect();
        Truck {
            id: TruckId::from(id),
            name: format!("Orca Hauler {id}"),
            driver: "John D.".to_string(),
            status,
            fuel_level,
            capacity: 300.0,
            current_mpg: 7.0,
            location: "Route 66".to_string(),
            history,
            last_updated: "Just now".to_string(),
        }
    }
}
