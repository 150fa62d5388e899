//! Arrival estimates over the closed campus loop
//!
//! The route is a single directed cycle, so the distance to any stop is a
//! forward stop count multiplied by the fixed segment and dwell durations.

use super::bus::{BusPhase, SimBus};
use super::types::{StopIndex, DWELL_TIME, TRAVEL_TIME_PER_SEGMENT};

/// Seconds left on the segment the bus is currently driving
fn remaining_on_segment(progress: f64) -> u32 {
    ((1.0 - progress) * TRAVEL_TIME_PER_SEGMENT as f64).round().max(0.0) as u32
}

/// Seconds until `bus` reaches the stop at `target`
///
/// Returns `None` when `target` is not on a route of `stop_count` stops.
pub fn eta_seconds(bus: &SimBus, target: StopIndex, stop_count: usize) -> Option<u32> {
    if stop_count == 0 || target.0 >= stop_count {
        return None;
    }

    match bus.phase {
        BusPhase::Dwelling { remaining } => {
            let stops_away = bus.current_stop.advances_to(target, stop_count) as u32;
            if stops_away == 0 {
                return Some(0);
            }
            Some(remaining + stops_away * TRAVEL_TIME_PER_SEGMENT + (stops_away - 1) * DWELL_TIME)
        }
        BusPhase::Traveling { progress } => {
            let next_stop = bus.current_stop.next(stop_count);
            let to_next = remaining_on_segment(progress);
            if next_stop == target {
                return Some(to_next);
            }

            let stops_away = next_stop.advances_to(target, stop_count) as u32;
            Some(
                to_next
                    + DWELL_TIME
                    + stops_away * TRAVEL_TIME_PER_SEGMENT
                    + stops_away.saturating_sub(1) * DWELL_TIME,
            )
        }
    }
}

/// Seconds until `bus` pulls into its next stop, counting any dwell left here
pub fn eta_to_next_stop(bus: &SimBus) -> u32 {
    match bus.phase {
        BusPhase::Dwelling { remaining } => remaining + TRAVEL_TIME_PER_SEGMENT,
        BusPhase::Traveling { progress } => remaining_on_segment(progress),
    }
}

/// Format seconds as a zero-padded `MM:SS` countdown
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Parse a `MM:SS` countdown back into seconds
pub fn parse_clock(text: &str) -> Option<u32> {
    let (minutes, seconds) = text.trim().split_once(':')?;
    let minutes: u32 = minutes.parse().ok()?;
    let seconds: u32 = seconds.parse().ok()?;
    if seconds >= 60 {
        return None;
    }
    minutes.checked_mul(60)?.checked_add(seconds)
}

/// Whole minutes shown next to an ETA, rounded up and never below 1
pub fn format_minutes(seconds: u32) -> u32 {
    seconds.div_ceil(60).max(1)
}
