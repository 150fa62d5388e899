//! Arrival estimates and countdown formatting

use ebus_tracker::simulation::{
    eta_seconds, eta_to_next_stop, format_clock, format_minutes, parse_clock, BusId, BusPhase,
    SimBus, SimId, StopIndex, DWELL_TIME, TRAVEL_TIME_PER_SEGMENT,
};

const STOPS: usize = 10;

fn bus_at(stop: usize, phase: BusPhase) -> SimBus {
    SimBus::new(BusId(SimId(1)), "รถเมล์ที่ 1", "รถคัน 1", StopIndex(stop), phase, 22, 10, 80)
}

#[test]
fn test_dwelling_bus_two_stops_away() {
    let bus = bus_at(0, BusPhase::Dwelling { remaining: 180 });
    // 180 dwell + 2 segments + 1 intermediate dwell
    assert_eq!(eta_seconds(&bus, StopIndex(2), STOPS), Some(1080));
}

#[test]
fn test_travelling_bus_to_next_stop() {
    let bus = bus_at(3, BusPhase::Traveling { progress: 0.4 });
    assert_eq!(eta_seconds(&bus, StopIndex(4), STOPS), Some(180));
}

#[test]
fn test_travelling_bus_further_along() {
    let bus = bus_at(3, BusPhase::Traveling { progress: 0.4 });
    // 180 to P5, dwell there, then two segments with one dwell at P6
    assert_eq!(eta_seconds(&bus, StopIndex(6), STOPS), Some(180 + 300 + 600 + 300));
}

#[test]
fn test_dwelling_bus_at_target_is_zero() {
    for stop in 0..STOPS {
        let bus = bus_at(stop, BusPhase::Dwelling { remaining: 120 });
        assert_eq!(eta_seconds(&bus, StopIndex(stop), STOPS), Some(0));
    }
}

#[test]
fn test_travelling_bus_full_loop_back_to_its_stop() {
    let bus = bus_at(5, BusPhase::Traveling { progress: 0.0 });
    let expected = TRAVEL_TIME_PER_SEGMENT * STOPS as u32 + DWELL_TIME * (STOPS as u32 - 1);
    assert_eq!(eta_seconds(&bus, StopIndex(5), STOPS), Some(expected));
}

#[test]
fn test_eta_grows_around_the_loop_for_travelling_bus() {
    for current in 0..STOPS {
        for progress in [0.0, 0.25, 0.6, 0.95] {
            let bus = bus_at(current, BusPhase::Traveling { progress });
            let mut previous = 0;
            for step in 1..=STOPS {
                let target = StopIndex((current + step) % STOPS);
                let eta = eta_seconds(&bus, target, STOPS).expect("target on route");
                assert!(
                    eta >= previous,
                    "eta dropped from {} to {} at step {}",
                    previous,
                    eta,
                    step
                );
                previous = eta;
            }
        }
    }
}

#[test]
fn test_eta_grows_around_the_loop_for_dwelling_bus() {
    for current in 0..STOPS {
        let bus = bus_at(current, BusPhase::Dwelling { remaining: 90 });
        let mut previous = 0;
        // Stepping all the way round lands on the bus itself, which is 0
        for step in 1..STOPS {
            let target = StopIndex((current + step) % STOPS);
            let eta = eta_seconds(&bus, target, STOPS).expect("target on route");
            assert!(eta >= previous);
            previous = eta;
        }
    }
}

#[test]
fn test_target_outside_route_is_unknown() {
    let bus = bus_at(0, BusPhase::Dwelling { remaining: 100 });
    assert_eq!(eta_seconds(&bus, StopIndex(STOPS), STOPS), None);
    assert_eq!(eta_seconds(&bus, StopIndex(0), 0), None);
}

#[test]
fn test_eta_to_next_stop() {
    let dwelling = bus_at(0, BusPhase::Dwelling { remaining: 180 });
    assert_eq!(eta_to_next_stop(&dwelling), 480);

    let travelling = bus_at(3, BusPhase::Traveling { progress: 0.4 });
    assert_eq!(eta_to_next_stop(&travelling), 180);
}

#[test]
fn test_format_clock() {
    assert_eq!(format_clock(0), "00:00");
    assert_eq!(format_clock(65), "01:05");
    assert_eq!(format_clock(300), "05:00");
    assert_eq!(format_clock(3599), "59:59");
}

#[test]
fn test_format_clock_round_trips_over_dwell_range() {
    for seconds in 0..=DWELL_TIME {
        let text = format_clock(seconds);
        assert_eq!(parse_clock(&text), Some(seconds), "failed for {}", text);
    }
}

#[test]
fn test_parse_clock_rejects_garbage() {
    assert_eq!(parse_clock("5"), None);
    assert_eq!(parse_clock("aa:bb"), None);
    assert_eq!(parse_clock("01:60"), None);
}

#[test]
fn test_parse_clock_rejects_overflowing_minutes() {
    assert_eq!(parse_clock("99999999:00"), None);
    assert_eq!(parse_clock("71582788:16"), None);
    assert_eq!(parse_clock("71582788:15"), Some(u32::MAX));
}

#[test]
fn test_format_minutes_rounds_up_with_floor_of_one() {
    assert_eq!(format_minutes(0), 1);
    assert_eq!(format_minutes(30), 1);
    assert_eq!(format_minutes(60), 1);
    assert_eq!(format_minutes(61), 2);
    assert_eq!(format_minutes(1080), 18);
}
