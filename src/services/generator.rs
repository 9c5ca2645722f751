//! Fleet Generator
//!
//! Builds the initial fleet snapshot: one truck per slot, each with a 13-hour
//! fuel history walked backward from the current hour.

use crate::constants::{
    DRIVERS, HISTORY_LEN, LAST_UPDATED_LABEL, LOCATIONS, MAX_CONSUMPTION_RATE, MPG_MIN,
    MPG_SPREAD, REFUEL_LEVEL, START_LEVEL_MAX, START_LEVEL_MIN, TRUCK_CAPACITY_GAL,
    TRUCK_ID_BASE,
};
use crate::domain::{Fleet, FuelDataPoint, FuelHistory, Truck, TruckId, TruckStatus};
use crate::services::rng::SimRng;
use crate::services::simulator::round_tenth;
use chrono::{DateTime, TimeDelta, TimeZone, Timelike};

/// Status table, assigned round-robin like the driver and location tables
const STATUSES: [TruckStatus; 5] = [
    TruckStatus::Moving,
    TruckStatus::Idling,
    TruckStatus::Moving,
    TruckStatus::Stopped,
    TruckStatus::Moving,
];

/// Generates randomized fleets of a fixed size
#[derive(Clone, Copy, Debug)]
pub struct FleetGenerator {
    count: usize,
}

impl FleetGenerator {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    /// Generate `count` trucks with histories ending at `now`'s hour
    ///
    /// Tables shorter than the fleet wrap around, so truck 6 gets truck 1's
    /// driver, location and status.
    pub fn generate<Tz: TimeZone>(&self, rng: &mut SimRng, now: &DateTime<Tz>) -> Fleet {
        let fleet: Fleet = (0..self.count)
            .map(|index| self.generate_truck(index, rng, now))
            .collect();
        tracing::info!(trucks = fleet.len(), "Generated fleet");
        fleet
    }

    fn generate_truck<Tz: TimeZone>(
        &self,
        index: usize,
        rng: &mut SimRng,
        now: &DateTime<Tz>,
    ) -> Truck {
        let number = index + 1;
        let history = generate_history(rng, now);
        let fuel_level = history.last().map(|p| f64::from(p.level)).unwrap_or(REFUEL_LEVEL);
        let current_mpg = MPG_MIN + rng.below(MPG_SPREAD);

        let truck = Truck {
            id: TruckId::numbered(TRUCK_ID_BASE + number),
            name: format!("Orca Hauler {number}"),
            driver: DRIVERS[index % DRIVERS.len()].to_string(),
            status: STATUSES[index % STATUSES.len()],
            fuel_level,
            capacity: TRUCK_CAPACITY_GAL,
            current_mpg,
            location: LOCATIONS[index % LOCATIONS.len()].to_string(),
            history,
            last_updated: LAST_UPDATED_LABEL.to_string(),
        };
        tracing::debug!(truck = %truck.id, status = %truck.status, fuel = truck.fuel_level, "Generated truck");
        truck
    }
}

/// Walk back `HISTORY_LEN - 1` hours from `now`, draining a running level
///
/// A level that would drop below zero is reset to full, which models a refuel
/// inside the window; the series is therefore not guaranteed to be monotonic.
fn generate_history<Tz: TimeZone>(rng: &mut SimRng, now: &DateTime<Tz>) -> FuelHistory {
    let mut level = rng.range(START_LEVEL_MIN..START_LEVEL_MAX);

    (0..HISTORY_LEN)
        .rev()
        .map(|hours_back| {
            let time = now.clone() - TimeDelta::hours(hours_back as i64);
            let consumption = rng.below(MAX_CONSUMPTION_RATE);
            level -= consumption / 2.0;
            if level < 0.0 {
                level = REFUEL_LEVEL;
            }
            FuelDataPoint {
                time: format!("{}:00", time.hour()),
                level: level.round().clamp(0.0, 100.0) as u8,
                consumption_rate: round_tenth(consumption),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 14, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn test_generates_requested_trucks_in_order() {
        let mut rng = SimRng::from_seed_u64(1);
        let fleet = FleetGenerator::new(5).generate(&mut rng, &fixed_now());

        let ids: Vec<&str> = fleet.ids().map(TruckId::as_str).collect();
        assert_eq!(ids, vec!["TRK-101", "TRK-102", "TRK-103", "TRK-104", "TRK-105"]);

        let statuses: Vec<TruckStatus> = fleet.trucks().map(|t| t.status).collect();
        assert_eq!(statuses, STATUSES.to_vec());

        let first = fleet.first().expect("first truck");
        assert_eq!(first.name, "Orca Hauler 1");
        assert_eq!(first.driver, "John D.");
        assert_eq!(first.location, "I-40 Westbound");
        assert_eq!(first.capacity, 300.0);
        assert_eq!(first.last_updated, "Just now");
    }

    #[test]
    fn test_history_shape() {
        let mut rng = SimRng::from_seed_u64(2);
        let fleet = FleetGenerator::new(5).generate(&mut rng, &fixed_now());

        for truck in fleet.trucks() {
            assert_eq!(truck.history.len(), HISTORY_LEN);

            let labels: Vec<&str> = truck.history.iter().map(|p| p.time.as_str()).collect();
            assert_eq!(labels.first(), Some(&"2:00"));
            assert_eq!(labels.last(), Some(&"14:00"));

            for point in truck.history.iter() {
                assert!(point.level <= 100);
                assert!((0.0..=5.0).contains(&point.consumption_rate));
                assert_eq!(point.consumption_rate, round_tenth(point.consumption_rate));
            }

            let last = truck.history.last().expect("last point");
            assert_eq!(truck.fuel_level, f64::from(last.level));
            assert!(truck.fuel_level > 0.0 && truck.fuel_level <= 100.0);
            assert!((6.5..8.5).contains(&truck.current_mpg));
        }
    }

    #[test]
    fn test_same_seed_same_fleet() {
        let now = fixed_now();
        let a = FleetGenerator::new(5).generate(&mut SimRng::from_seed_u64(42), &now);
        let b = FleetGenerator::new(5).generate(&mut SimRng::from_seed_u64(42), &now);
        assert_eq!(a, b);
    }

    #[test]
    fn test_tables_wrap_for_large_fleets() {
        let mut rng = SimRng::from_seed_u64(3);
        let fleet = FleetGenerator::new(7).generate(&mut rng, &fixed_now());

        assert_eq!(fleet.len(), 7);
        let sixth = fleet.get(&"TRK-106".into()).expect("sixth truck");
        assert_eq!(sixth.driver, "John D.");
        assert_eq!(sixth.status, TruckStatus::Moving);
        let seventh = fleet.get(&"TRK-107".into()).expect("seventh truck");
        assert_eq!(seventh.status, TruckStatus::Idling);
    }

    #[test]
    fn test_zero_count_is_empty() {
        let fleet = FleetGenerator::new(0).generate(&mut SimRng::from_seed_u64(4), &fixed_now());
        assert!(fleet.is_empty());
    }
}
