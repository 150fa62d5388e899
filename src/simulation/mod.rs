//! Standalone bus fleet simulation module
//!
//! This module contains the tick simulator and the ETA estimator. It has no
//! knowledge of how the fleet is displayed, so it can be tested on its own.

mod bus;
mod eta;
mod fleet;
mod random;
mod stop;
mod types;

pub use bus::{advance, BusPhase, BusStatus, BusUpdateResult, SimBus};
pub use eta::{eta_seconds, eta_to_next_stop, format_clock, format_minutes, parse_clock};
pub use fleet::{initial_buses, Arrival, FleetStats, SimFleet, StopArrivals};
pub use random::{ScriptedRandom, SeededRandom, ThreadRandom, TickRandom};
pub use stop::{campus_stops, Facility, SimStop};
pub use types::{
    BusId, Position, SimId, StopIndex, ABOUT_TO_DEPART_THRESHOLD, BATTERY_FLOOR, CLOCK_TICK_MS,
    DWELL_TIME, MAX_SPEED_KMH, MIN_SPEED_KMH, PASSENGER_CAPACITY, SIM_SECONDS_PER_TICK,
    SIM_TICK_MS, TRAVEL_TIME_PER_SEGMENT,
};
