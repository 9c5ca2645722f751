//! Derived Metrics
//!
//! Values computed from truck fields on every read. Nothing here is stored on
//! the truck, so a fresh snapshot always yields fresh numbers.

use crate::constants::LOW_FUEL_THRESHOLD;
use crate::domain::truck::{Fleet, Truck, TruckId, TruckStatus};
use serde::Serialize;

/// Gallons left in the tank
pub fn remaining_gallons(truck: &Truck) -> f64 {
    truck.capacity * (truck.fuel_level / 100.0)
}

/// Miles the remaining fuel covers at the truck's current efficiency
pub fn estimated_range_miles(truck: &Truck) -> i64 {
    (remaining_gallons(truck) * truck.current_mpg).round() as i64
}

pub fn is_low_fuel(truck: &Truck) -> bool {
    truck.fuel_level < LOW_FUEL_THRESHOLD
}

/// Mean efficiency across the fleet, `None` for an empty fleet
pub fn fleet_average_mpg(fleet: &Fleet) -> Option<f64> {
    if fleet.is_empty() {
        return None;
    }
    Some(fleet.trucks().map(|t| t.current_mpg).sum::<f64>() / fleet.len() as f64)
}

/// Per-truck metrics bundle for display
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckMetrics {
    pub remaining_gallons: f64,
    pub estimated_range_miles: i64,
    pub low_fuel: bool,
    /// Efficiency relative to the fleet average
    pub mpg_vs_fleet_avg: Option<f64>,
}

impl TruckMetrics {
    pub fn compute(truck: &Truck, fleet: &Fleet) -> Self {
        Self {
            remaining_gallons: remaining_gallons(truck),
            estimated_range_miles: estimated_range_miles(truck),
            low_fuel: is_low_fuel(truck),
            mpg_vs_fleet_avg: fleet_average_mpg(fleet).map(|avg| truck.current_mpg - avg),
        }
    }
}

/// Fleet-wide summary
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSummary {
    pub total: usize,
    pub moving: usize,
    pub idling: usize,
    pub stopped: usize,
    pub average_fuel_level: Option<f64>,
    pub low_fuel: Vec<TruckId>,
}

impl FleetSummary {
    pub fn compute(fleet: &Fleet) -> Self {
        let mut summary = FleetSummary {
            total: fleet.len(),
            ..Default::default()
        };
        let mut level_sum = 0.0;

        for truck in fleet.trucks() {
            match truck.status {
                TruckStatus::Moving => summary.moving += 1,
                TruckStatus::Idling => summary.idling += 1,
                TruckStatus::Stopped => summary.stopped += 1,
            }
            level_sum += truck.fuel_level;
            if is_low_fuel(truck) {
                summary.low_fuel.push(truck.id.clone());
            }
        }

        if summary.total > 0 {
            summary.average_fuel_level = Some(level_sum / summary.total as f64);
        }
        summary
    }
}
