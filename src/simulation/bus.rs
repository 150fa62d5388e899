//! Bus movement logic for the fleet simulation
//!
//! A bus alternates between dwelling at a stop and travelling along the
//! segment to the next stop. [`advance`] moves one bus forward by a slice of
//! simulated time.

use log::debug;
use serde::Serialize;

use super::random::TickRandom;
use super::types::{
    BusId, StopIndex, ABOUT_TO_DEPART_THRESHOLD, BATTERY_DRAIN_CHANCE, BATTERY_FLOOR, DWELL_TIME,
    MAX_ALIGHTING, MAX_BOARDING, MAX_SPEED_KMH, MIN_SPEED_KMH, PASSENGER_CAPACITY,
    PASSENGER_DRIFT, PASSENGER_DRIFT_CHANCE, TRAVEL_TIME_PER_SEGMENT,
};

/// Progress within this distance of 1.0 counts as arrival.
const ARRIVAL_EPSILON: f64 = 1e-9;

/// What a bus is doing right now
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum BusPhase {
    /// Parked at the current stop with `remaining` dwell seconds left
    Dwelling { remaining: u32 },
    /// Between the current stop and the next one, `progress` in [0, 1]
    Traveling { progress: f64 },
}

/// Status label shown on the bus cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BusStatus {
    Traveling,
    Boarding,
    AboutToDepart,
}

impl BusStatus {
    pub fn label(self) -> &'static str {
        match self {
            BusStatus::Traveling => "กำลังเดินทาง",
            BusStatus::Boarding => "จอดรับผู้โดยสาร",
            BusStatus::AboutToDepart => "กำลังจะออก",
        }
    }
}

/// Result of a bus update indicating what happened during the tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusUpdateResult {
    Continue,                 // Bus keeps dwelling or travelling
    Departed(StopIndex),      // Bus left this stop
    ArrivedAtStop(StopIndex), // Bus reached this stop and started dwelling
}

/// A bus in the fleet simulation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimBus {
    pub id: BusId,
    pub name: String,
    pub code: String,
    pub current_stop: StopIndex,
    pub phase: BusPhase,
    /// Instantaneous speed in km/h
    pub speed: u32,
    pub passengers: u32,
    /// Battery charge in percent
    pub battery: u32,
}

impl SimBus {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: BusId,
        name: &str,
        code: &str,
        current_stop: StopIndex,
        phase: BusPhase,
        speed: u32,
        passengers: u32,
        battery: u32,
    ) -> Self {
        let speed = match phase {
            BusPhase::Dwelling { .. } => 0,
            BusPhase::Traveling { .. } => speed,
        };
        Self {
            id,
            name: name.to_string(),
            code: code.to_string(),
            current_stop,
            phase: normalize_phase(phase),
            speed,
            passengers: passengers.min(PASSENGER_CAPACITY),
            battery: battery.clamp(BATTERY_FLOOR, 100),
        }
    }

    pub fn is_dwelling(&self) -> bool {
        matches!(self.phase, BusPhase::Dwelling { .. })
    }

    /// Fraction of the current segment covered, 0 while dwelling
    pub fn progress(&self) -> f64 {
        match self.phase {
            BusPhase::Dwelling { .. } => 0.0,
            BusPhase::Traveling { progress } => progress,
        }
    }

    /// Dwell seconds left, 0 while travelling
    pub fn dwell_remaining(&self) -> u32 {
        match self.phase {
            BusPhase::Dwelling { remaining } => remaining,
            BusPhase::Traveling { .. } => 0,
        }
    }

    pub fn status(&self) -> BusStatus {
        match self.phase {
            BusPhase::Traveling { .. } => BusStatus::Traveling,
            BusPhase::Dwelling { remaining } if remaining <= ABOUT_TO_DEPART_THRESHOLD => {
                BusStatus::AboutToDepart
            }
            BusPhase::Dwelling { .. } => BusStatus::Boarding,
        }
    }

    /// The stop this bus will reach next
    pub fn next_stop(&self, stop_count: usize) -> StopIndex {
        self.current_stop.next(stop_count)
    }

    /// Advance this bus in place and report what happened
    pub fn update(
        &mut self,
        elapsed_secs: u32,
        stop_count: usize,
        rng: &mut dyn TickRandom,
    ) -> BusUpdateResult {
        let (next, result) = advance(self, elapsed_secs, stop_count, rng);
        *self = next;
        result
    }
}

fn normalize_phase(phase: BusPhase) -> BusPhase {
    match phase {
        BusPhase::Dwelling { remaining } => BusPhase::Dwelling {
            remaining: remaining.min(DWELL_TIME),
        },
        BusPhase::Traveling { progress } => BusPhase::Traveling {
            progress: progress.clamp(0.0, 1.0),
        },
    }
}

fn cruising_speed(rng: &mut dyn TickRandom) -> u32 {
    rng.int_between(MIN_SPEED_KMH as i32, MAX_SPEED_KMH as i32 - 1) as u32
}

fn clamp_passengers(count: i32) -> u32 {
    count.clamp(0, PASSENGER_CAPACITY as i32) as u32
}

/// Move `bus` forward by `elapsed_secs` of simulated time
///
/// Returns the updated bus together with the transition that happened, if
/// any. At most one phase change happens per call.
pub fn advance(
    bus: &SimBus,
    elapsed_secs: u32,
    stop_count: usize,
    rng: &mut dyn TickRandom,
) -> (SimBus, BusUpdateResult) {
    let mut next = bus.clone();

    match bus.phase {
        BusPhase::Dwelling { remaining } => {
            let remaining = remaining.saturating_sub(elapsed_secs);
            next.speed = 0;

            if remaining == 0 {
                next.phase = BusPhase::Traveling { progress: 0.0 };
                next.speed = cruising_speed(rng);
                debug!(
                    "Bus {} departing stop {} at {} km/h",
                    bus.id.0 .0, bus.current_stop.0, next.speed
                );
                return (next, BusUpdateResult::Departed(bus.current_stop));
            }

            next.phase = BusPhase::Dwelling { remaining };
            (next, BusUpdateResult::Continue)
        }
        BusPhase::Traveling { progress } => {
            let increment = elapsed_secs as f64 / TRAVEL_TIME_PER_SEGMENT as f64;
            let mut progress = (progress + increment).min(1.0);
            if progress >= 1.0 - ARRIVAL_EPSILON {
                progress = 1.0;
            }
            next.speed = cruising_speed(rng);

            if rng.chance(PASSENGER_DRIFT_CHANCE) {
                let drift = rng.int_between(-PASSENGER_DRIFT, PASSENGER_DRIFT);
                next.passengers = clamp_passengers(next.passengers as i32 + drift);
            }

            if progress < 1.0 {
                next.phase = BusPhase::Traveling { progress };
                return (next, BusUpdateResult::Continue);
            }

            let arrived = bus.current_stop.next(stop_count);
            next.current_stop = arrived;
            next.speed = 0;
            next.phase = BusPhase::Dwelling {
                remaining: DWELL_TIME,
            };

            let alighting = rng.int_between(0, next.passengers.min(MAX_ALIGHTING) as i32);
            let boarding = rng.int_between(0, MAX_BOARDING as i32);
            next.passengers = clamp_passengers(next.passengers as i32 - alighting + boarding);

            if rng.chance(BATTERY_DRAIN_CHANCE) {
                next.battery = next.battery.saturating_sub(1).max(BATTERY_FLOOR);
            }

            debug!(
                "Bus {} arrived at stop {}: -{} +{} passengers, battery {}%",
                bus.id.0 .0, arrived.0, alighting, boarding, next.battery
            );
            (next, BusUpdateResult::ArrivedAtStop(arrived))
        }
    }
}
