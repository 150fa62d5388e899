//! Core types for the bus fleet simulation
//!
//! Identifiers, map coordinates and the timing constants shared by the
//! tick simulator and the ETA estimator.

use serde::Serialize;

/// A unique identifier for simulation entities
/// This is a simple wrapper around a usize for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SimId(pub usize);

/// A wrapper type for bus IDs (1-based, as shown on the dashboard)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BusId(pub SimId);

/// Position of a stop along the route (0-based index into the stop list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StopIndex(pub usize);

impl StopIndex {
    /// The stop that follows this one on a closed loop of `stop_count` stops
    pub fn next(self, stop_count: usize) -> StopIndex {
        StopIndex((self.0 + 1) % stop_count)
    }

    /// Number of forward stop-advances needed to get from `self` to `target`
    pub fn advances_to(self, target: StopIndex, stop_count: usize) -> usize {
        (target.0 + stop_count - self.0 % stop_count) % stop_count
    }
}

/// A 2D position on the campus layout
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn lerp(&self, other: &Position, t: f32) -> Position {
        Position {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

/// Simulated seconds a bus needs to cover one segment between adjacent stops
pub const TRAVEL_TIME_PER_SEGMENT: u32 = 300;

/// Simulated seconds a bus dwells at every stop
pub const DWELL_TIME: u32 = 300;

/// Wall-clock milliseconds between simulation ticks
pub const SIM_TICK_MS: u64 = 2000;

/// Simulated seconds that pass per tick (20x acceleration at the default tick)
pub const SIM_SECONDS_PER_TICK: u32 = 15;

/// Wall-clock milliseconds between header clock refreshes
pub const CLOCK_TICK_MS: u64 = 1000;

/// Seats per bus
pub const PASSENGER_CAPACITY: u32 = 40;

/// Battery never drops below this percentage
pub const BATTERY_FLOOR: u32 = 5;

/// Dwell seconds at or below which a bus is announced as about to depart
pub const ABOUT_TO_DEPART_THRESHOLD: u32 = 30;

/// Cruising speed range in km/h, lower bound inclusive, upper bound exclusive
pub const MIN_SPEED_KMH: u32 = 15;
pub const MAX_SPEED_KMH: u32 = 30;

/// Probability per travelling tick that the passenger count drifts
pub const PASSENGER_DRIFT_CHANCE: f64 = 0.15;

/// Largest passenger drift per travelling tick, in either direction
pub const PASSENGER_DRIFT: i32 = 2;

/// Most passengers that can alight at a single stop
pub const MAX_ALIGHTING: u32 = 8;

/// Most passengers that can board at a single stop
pub const MAX_BOARDING: u32 = 10;

/// Probability that a completed segment costs one battery percent
pub const BATTERY_DRAIN_CHANCE: f64 = 0.4;
