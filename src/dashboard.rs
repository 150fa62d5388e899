//! Text and JSON renderings of the fleet
//!
//! Every function here is a pure view over a [`SimFleet`]; nothing mutates
//! simulation state.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::simulation::{
    eta_seconds, eta_to_next_stop, format_clock, format_minutes, BusId, BusPhase, BusStatus,
    FleetStats, SimBus, SimFleet, StopArrivals, StopIndex, PASSENGER_CAPACITY,
};

/// Battery level bands used to colour the gauge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryLevel {
    Good,
    Low,
    Critical,
}

impl BatteryLevel {
    pub fn from_percent(percent: u32) -> Self {
        if percent > 50 {
            BatteryLevel::Good
        } else if percent > 20 {
            BatteryLevel::Low
        } else {
            BatteryLevel::Critical
        }
    }
}

fn gauge(value: u32, max: u32, width: usize) -> String {
    let filled = if max == 0 {
        0
    } else {
        ((value.min(max) as usize * width) + max as usize / 2) / max as usize
    };
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn bus_label(id: BusId) -> String {
    format!("รถ {}", id.0 .0)
}

/// Header line with the wall-clock time
pub fn render_header(clock: &str) -> String {
    format!("=== Campus E-Bus Live Tracking | {} ===", clock)
}

/// Status card for one bus
pub fn render_bus_card(fleet: &SimFleet, bus: &SimBus) -> String {
    let stop_count = fleet.stop_count();
    let mut out = String::new();

    let motion = if bus.is_dwelling() {
        "parked".to_string()
    } else {
        format!("{} km/h", bus.speed)
    };
    out.push_str(&format!(
        "[{}] {} - {} ({})\n",
        bus.id.0 .0,
        bus.name,
        bus.status().label(),
        motion
    ));

    if let Some(stop) = fleet.stop(bus.current_stop) {
        let verb = if bus.is_dwelling() { "At" } else { "Leaving" };
        out.push_str(&format!(
            "  {}: {} {} ({})\n",
            verb, stop.code, stop.name, stop.name_en
        ));
    }

    if let BusPhase::Dwelling { remaining } = bus.phase {
        let departing = if bus.status() == BusStatus::AboutToDepart {
            " (departing soon)"
        } else {
            ""
        };
        out.push_str(&format!("  Departs in: {}{}\n", format_clock(remaining), departing));
    }

    if stop_count > 0 {
        if let Some(next) = fleet.stop(bus.next_stop(stop_count)) {
            out.push_str(&format!(
                "  Next: {} {} in {} min\n",
                next.code,
                next.name,
                format_minutes(eta_to_next_stop(bus))
            ));
        }
    }

    out.push_str(&format!(
        "  Passengers: {} {}/{}\n",
        gauge(bus.passengers, PASSENGER_CAPACITY, 20),
        bus.passengers,
        PASSENGER_CAPACITY
    ));

    let level = match BatteryLevel::from_percent(bus.battery) {
        BatteryLevel::Good => "",
        BatteryLevel::Low => " low",
        BatteryLevel::Critical => " CRITICAL",
    };
    out.push_str(&format!(
        "  Battery:    {} {}%{}\n",
        gauge(bus.battery, 100, 20),
        bus.battery,
        level
    ));
    out
}

/// Status cards for the whole fleet
pub fn render_bus_cards(fleet: &SimFleet) -> String {
    fleet
        .buses
        .iter()
        .map(|bus| render_bus_card(fleet, bus))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_stop_arrivals(fleet: &SimFleet, arrivals: &StopArrivals) -> String {
    let mut out = String::new();
    let Some(stop) = fleet.stop(arrivals.stop) else {
        return out;
    };

    out.push_str(&format!("{:>4} {}\n", stop.code, stop.name));

    if let Some((bus, remaining)) = arrivals.dwelling {
        out.push_str(&format!(
            "       {} จอดอยู่ {}\n",
            bus_label(bus),
            format_clock(remaining)
        ));
    }

    for arrival in &arrivals.approaching {
        out.push_str(&format!(
            "       {} ถึงใน {} นาที\n",
            bus_label(arrival.bus),
            format_minutes(arrival.eta)
        ));
    }

    if arrivals.dwelling.is_none() && arrivals.approaching.is_empty() {
        out.push_str("       รอข้อมูล...\n");
    }
    out
}

/// Per-stop arrival timeline in route order
pub fn render_timeline(fleet: &SimFleet) -> String {
    let mut out = String::from("=== Stop Timeline ===\n");
    for arrivals in fleet.timeline() {
        out.push_str(&render_stop_arrivals(fleet, &arrivals));
    }
    out
}

/// Stop and facility directory
pub fn render_stop_directory(fleet: &SimFleet) -> String {
    let mut out = String::from("=== Stops & Facilities ===\n");
    for stop in &fleet.stops {
        let facilities: Vec<&str> = stop.facilities.iter().map(|f| f.label()).collect();
        out.push_str(&format!(
            "{:>4} {} ({}) at ({}, {})\n",
            stop.code, stop.name, stop.name_en, stop.position.x, stop.position.y
        ));
        out.push_str(&format!("       {}\n", facilities.join(", ")));
    }
    out
}

/// Every bus's ETA to every stop, in minutes
pub fn render_eta_matrix(fleet: &SimFleet) -> String {
    let stop_count = fleet.stop_count();
    let mut out = String::from("=== ETA (minutes) ===\n");
    out.push_str(&" ".repeat(6));
    for stop in &fleet.stops {
        out.push_str(&format!("{:>5}", stop.code));
    }
    out.push('\n');

    for bus in &fleet.buses {
        out.push_str(&format!("{:<6}", format!("Bus {}", bus.id.0 .0)));
        for i in 0..stop_count {
            let cell = match eta_seconds(bus, StopIndex(i), stop_count) {
                Some(0) => "here".to_string(),
                Some(eta) => format_minutes(eta).to_string(),
                None => "-".to_string(),
            };
            out.push_str(&format!("{:>5}", cell));
        }
        out.push('\n');
    }
    out
}

/// Full live view: header, map, bus cards and stop timeline
pub fn render_live(fleet: &SimFleet, clock: &str) -> String {
    let mut out = String::new();
    out.push_str(&render_header(clock));
    out.push_str("\n\n");
    out.push_str(&fleet.render_map());
    out.push('\n');
    out.push_str(&render_bus_cards(fleet));
    out.push('\n');
    out.push_str(&render_timeline(fleet));
    out
}

/// Serialisable view of one bus
#[derive(Debug, Clone, Serialize)]
pub struct BusSnapshot<'a> {
    #[serde(flatten)]
    pub bus: &'a SimBus,
    pub status: BusStatus,
    pub battery_level: BatteryLevel,
    pub eta_to_next_stop: u32,
}

/// Serialisable view of one stop
#[derive(Debug, Clone, Serialize)]
pub struct StopSnapshot<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub name_en: &'a str,
    #[serde(flatten)]
    pub arrivals: StopArrivals,
}

/// Serialisable view of the whole fleet at one instant
#[derive(Debug, Clone, Serialize)]
pub struct FleetSnapshot<'a> {
    pub time: u64,
    pub clock: &'a str,
    pub stats: FleetStats,
    pub buses: Vec<BusSnapshot<'a>>,
    pub stops: Vec<StopSnapshot<'a>>,
}

impl<'a> FleetSnapshot<'a> {
    pub fn capture(fleet: &'a SimFleet, clock: &'a str) -> Self {
        let buses = fleet
            .buses
            .iter()
            .map(|bus| BusSnapshot {
                bus,
                status: bus.status(),
                battery_level: BatteryLevel::from_percent(bus.battery),
                eta_to_next_stop: eta_to_next_stop(bus),
            })
            .collect();

        let stops = fleet
            .stops
            .iter()
            .map(|stop| StopSnapshot {
                code: &stop.code,
                name: &stop.name,
                name_en: &stop.name_en,
                arrivals: fleet.arrivals_at(stop.index),
            })
            .collect();

        Self {
            time: fleet.time,
            clock,
            stats: fleet.stats,
            buses,
            stops,
        }
    }

    /// One-line JSON encoding
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize fleet snapshot")
    }
}
