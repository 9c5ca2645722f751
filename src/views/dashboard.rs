//! Dashboard Views
//!
//! Plain-text renderings of each screen. Views read the store and derived
//! metrics; they never write to either.

use crate::domain::{Fleet, FleetSummary, Truck, TruckMetrics};
use crate::states::{FleetStore, resolve_selection};
use crate::utils::format::{
    format_gallons, format_mpg, format_percent, format_range, format_signed, level_bar, truncate,
};
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

pub fn render_landing() -> String {
    [
        "ORCA TRUCKS - Fleet Fuel Monitoring",
        "Real-time fuel levels, efficiency and range for every truck in your fleet.",
        "",
        "Type `open` to go to Fleet Login.",
    ]
    .join("\n")
}

pub fn render_login(error: Option<&str>) -> String {
    let mut out = String::from("Fleet Login\nType `login <username> <password>` or `cancel`.");
    if let Some(error) = error {
        let _ = write!(out, "\nError: {error}");
    }
    out
}

/// Shown while the fleet has not been generated yet
pub fn render_loading() -> String {
    "Loading fleet data...".to_string()
}

/// Full dashboard: truck picker plus the selected truck's panel
pub fn render_dashboard(store: &FleetStore) -> String {
    let Some(fleet) = store.snapshot() else {
        return render_loading();
    };
    let selected = store.selected_id();
    let Some(current) = resolve_selection(&fleet, selected.as_ref()) else {
        return render_loading();
    };

    let mut out = render_truck_list(&fleet, current);
    out.push('\n');
    out.push_str(&render_truck_panel(current, &fleet));
    out
}

/// One line per truck, selected truck marked with `>`
pub fn render_truck_list(fleet: &Fleet, current: &Truck) -> String {
    let mut out = format!("Fleet ({} trucks)\n", fleet.len());
    for truck in fleet.trucks() {
        let marker = if truck.id == current.id { '>' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {:<8} {:<16} {:<8} {:>4}  {}",
            truck.id,
            truncate(&truck.name, 16),
            truck.status,
            format_percent(truck.fuel_level),
            truncate(&truck.location, 18),
        );
    }
    out
}

pub fn render_truck_panel(truck: &Truck, fleet: &Fleet) -> String {
    let metrics = TruckMetrics::compute(truck, fleet);
    let mut out = String::new();

    let _ = writeln!(out, "{} [{}]", truck.name, truck.status);
    let _ = writeln!(
        out,
        "ID: {}  Driver: {}  Location: {}",
        truck.id, truck.driver, truck.location
    );
    let _ = writeln!(
        out,
        "Current Level: {}  {}{}",
        format_percent(truck.fuel_level),
        format_gallons(metrics.remaining_gallons, truck.capacity),
        if metrics.low_fuel { "  LOW FUEL" } else { "" }
    );
    let _ = write!(out, "Efficiency:    {}", format_mpg(truck.current_mpg));
    if let Some(delta) = metrics.mpg_vs_fleet_avg {
        let _ = write!(out, " ({} mpg vs fleet avg)", format_signed(delta));
    }
    out.push('\n');
    let _ = writeln!(out, "Est. Range:    {}", format_range(metrics.estimated_range_miles));
    let _ = writeln!(out, "Updated:       {}", truck.last_updated);

    out.push_str("Fuel Consumption Trend\n");
    for point in truck.history.iter() {
        let _ = writeln!(
            out,
            "  {:>5} {} {:>3}%  {:.1} gal/hr",
            point.time,
            level_bar(f64::from(point.level), BAR_WIDTH),
            point.level,
            point.consumption_rate
        );
    }
    out
}

pub fn render_summary(fleet: &Fleet) -> String {
    let summary = FleetSummary::compute(fleet);
    let mut out = format!(
        "Trucks: {}  Moving: {}  Idling: {}  Stopped: {}\n",
        summary.total, summary.moving, summary.idling, summary.stopped
    );
    match summary.average_fuel_level {
        Some(avg) => {
            let _ = writeln!(out, "Average level: {avg:.1}%");
        }
        None => out.push_str("Average level: -\n"),
    }
    if summary.low_fuel.is_empty() {
        out.push_str("No trucks low on fuel");
    } else {
        let ids: Vec<&str> = summary.low_fuel.iter().map(|id| id.as_str()).collect();
        let _ = write!(out, "Low on fuel: {}", ids.join(", "));
    }
    out
}

pub fn render_search(query: &str, hits: &[&Truck]) -> String {
    if hits.is_empty() {
        return format!("No trucks match \"{query}\"");
    }
    let mut out = format!("{} match(es) for \"{query}\"\n", hits.len());
    for truck in hits {
        let _ = writeln!(
            out,
            "  {:<8} {:<16} {} - {}",
            truck.id, truck.name, truck.driver, truck.location
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TruckStatus;
    use crate::domain::truck::fixtures::truck;
    use crate::services::{TickCallback, TickHandle};
    use crate::services::FleetDataSource;

    struct FixedSource(Fleet);

    impl FleetDataSource for FixedSource {
        fn fetch_initial(&self) -> Fleet {
            self.0.clone()
        }

        fn subscribe(&self, _on_tick: TickCallback) -> TickHandle {
            unreachable!("views never subscribe")
        }
    }

    fn fleet() -> Fleet {
        let mut low = truck("TRK-102", TruckStatus::Idling, 12.0);
        low.current_mpg = 8.0;
        [truck("TRK-101", TruckStatus::Moving, 50.0), low]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_login_shows_inline_error() {
        assert!(!render_login(None).contains("Error"));
        assert!(render_login(Some("Invalid username or password.")).contains("Invalid username"));
    }

    #[test]
    fn test_dashboard_loading_before_fleet() {
        assert_eq!(render_dashboard(&FleetStore::new()), render_loading());
    }

    #[test]
    fn test_dashboard_marks_resolved_selection() {
        let store = FleetStore::new();
        store.ensure_loaded(&FixedSource(fleet()));
        store.select("missing");

        let out = render_dashboard(&store);
        assert!(out.contains("> TRK-101"));
        assert!(out.contains("  TRK-102"));
        assert!(out.contains("150.0 / 300 gal"));
        assert!(out.contains("1050 mi"));
        assert!(out.contains("-0.5 mpg vs fleet avg"));
        assert!(!out.contains("LOW FUEL"));
    }

    #[test]
    fn test_panel_flags_low_fuel_and_lists_history() {
        let fleet = fleet();
        let low = fleet.get(&"TRK-102".into()).expect("truck");
        let out = render_truck_panel(low, &fleet);

        assert!(out.contains("LOW FUEL"));
        assert_eq!(out.lines().filter(|l| l.contains("gal/hr")).count(), 13);
    }

    #[test]
    fn test_summary_lists_low_fuel() {
        let out = render_summary(&fleet());
        assert!(out.contains("Moving: 1  Idling: 1  Stopped: 0"));
        assert!(out.contains("Average level: 31.0%"));
        assert!(out.contains("Low on fuel: TRK-102"));
    }

    #[test]
    fn test_search_rendering() {
        let fleet = fleet();
        assert!(render_search("x", &[]).contains("No trucks match"));
        let hits = fleet.search("trk-102");
        assert!(render_search("trk-102", &hits).contains("1 match(es)"));
    }
}
