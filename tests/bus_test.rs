//! Tick simulator behaviour for a single bus

use ebus_tracker::simulation::{
    advance, BusId, BusPhase, BusStatus, BusUpdateResult, ScriptedRandom, SeededRandom, SimBus,
    SimId, StopIndex, BATTERY_FLOOR, DWELL_TIME, MAX_SPEED_KMH, MIN_SPEED_KMH,
    PASSENGER_CAPACITY, SIM_SECONDS_PER_TICK,
};

const STOPS: usize = 10;

fn bus(stop: usize, phase: BusPhase, passengers: u32, battery: u32) -> SimBus {
    SimBus::new(
        BusId(SimId(1)),
        "รถเมล์ที่ 1",
        "รถคัน 1",
        StopIndex(stop),
        phase,
        20,
        passengers,
        battery,
    )
}

#[test]
fn test_travelling_bus_arrives_when_progress_reaches_one() {
    let start = bus(3, BusPhase::Traveling { progress: 0.95 }, 10, 70);
    let mut rng = ScriptedRandom::constant(0.99);

    let (next, result) = advance(&start, SIM_SECONDS_PER_TICK, STOPS, &mut rng);

    assert_eq!(result, BusUpdateResult::ArrivedAtStop(StopIndex(4)));
    assert_eq!(next.current_stop, StopIndex(4));
    assert_eq!(next.phase, BusPhase::Dwelling { remaining: DWELL_TIME });
    assert_eq!(next.speed, 0);
    assert_eq!(next.status(), BusStatus::Boarding);
    // 8 alight (capped by MAX_ALIGHTING), 10 board
    assert_eq!(next.passengers, 12);
    // 0.99 never passes the drain chance
    assert_eq!(next.battery, 70);
}

#[test]
fn test_arrival_drains_battery_and_passengers_with_low_draws() {
    let start = bus(3, BusPhase::Traveling { progress: 0.95 }, 10, 70);
    let mut rng = ScriptedRandom::constant(0.0);

    let (next, _) = advance(&start, SIM_SECONDS_PER_TICK, STOPS, &mut rng);

    // Drift of -2 on the road, nobody alights or boards at the stop
    assert_eq!(next.passengers, 8);
    assert_eq!(next.battery, 69);
}

#[test]
fn test_advance_does_not_mutate_input() {
    let start = bus(0, BusPhase::Traveling { progress: 0.5 }, 10, 70);
    let snapshot = start.clone();
    let mut rng = ScriptedRandom::constant(0.3);

    let (next, _) = advance(&start, SIM_SECONDS_PER_TICK, STOPS, &mut rng);

    assert_eq!(start, snapshot);
    assert!((next.progress() - 0.55).abs() < 1e-9);
}

#[test]
fn test_last_stop_wraps_to_first() {
    let mut b = bus(9, BusPhase::Traveling { progress: 0.99 }, 10, 70);
    let mut rng = ScriptedRandom::constant(0.5);

    let result = b.update(SIM_SECONDS_PER_TICK, STOPS, &mut rng);

    assert_eq!(result, BusUpdateResult::ArrivedAtStop(StopIndex(0)));
    assert_eq!(b.current_stop, StopIndex(0));
}

#[test]
fn test_zero_dwell_flips_to_travelling() {
    let mut b = bus(2, BusPhase::Dwelling { remaining: 0 }, 10, 70);
    let mut rng = ScriptedRandom::constant(0.5);

    let result = b.update(SIM_SECONDS_PER_TICK, STOPS, &mut rng);

    assert_eq!(result, BusUpdateResult::Departed(StopIndex(2)));
    assert!(!b.is_dwelling());
    assert_eq!(b.progress(), 0.0);
    assert_eq!(b.dwell_remaining(), 0);
    assert_eq!(b.current_stop, StopIndex(2));
    assert_eq!(b.status(), BusStatus::Traveling);
}

#[test]
fn test_dwell_countdown_reaches_zero_then_departs() {
    let mut b = bus(2, BusPhase::Dwelling { remaining: 30 }, 10, 70);
    let mut rng = ScriptedRandom::constant(0.5);

    assert_eq!(b.update(SIM_SECONDS_PER_TICK, STOPS, &mut rng), BusUpdateResult::Continue);
    assert_eq!(b.dwell_remaining(), 15);
    assert_eq!(b.status(), BusStatus::AboutToDepart);

    assert_eq!(
        b.update(SIM_SECONDS_PER_TICK, STOPS, &mut rng),
        BusUpdateResult::Departed(StopIndex(2))
    );
    assert_eq!(b.phase, BusPhase::Traveling { progress: 0.0 });
}

#[test]
fn test_dwell_status_thresholds() {
    let mut rng = ScriptedRandom::constant(0.5);

    let (boarding, _) = advance(
        &bus(0, BusPhase::Dwelling { remaining: 300 }, 10, 70),
        SIM_SECONDS_PER_TICK,
        STOPS,
        &mut rng,
    );
    assert_eq!(boarding.dwell_remaining(), 285);
    assert_eq!(boarding.status(), BusStatus::Boarding);
    assert_eq!(boarding.speed, 0);

    let (leaving, _) = advance(
        &bus(0, BusPhase::Dwelling { remaining: 45 }, 10, 70),
        SIM_SECONDS_PER_TICK,
        STOPS,
        &mut rng,
    );
    assert_eq!(leaving.dwell_remaining(), 30);
    assert_eq!(leaving.status(), BusStatus::AboutToDepart);
}

#[test]
fn test_speed_stays_in_cruising_range() {
    let mut b = bus(0, BusPhase::Traveling { progress: 0.0 }, 10, 70);
    let mut rng = SeededRandom::new(11);

    for _ in 0..500 {
        b.update(SIM_SECONDS_PER_TICK, STOPS, &mut rng);
        if b.is_dwelling() {
            assert_eq!(b.speed, 0);
        } else {
            assert!(b.speed >= MIN_SPEED_KMH && b.speed < MAX_SPEED_KMH, "speed {}", b.speed);
        }
    }
}

#[test]
fn test_passengers_and_battery_stay_in_bounds() {
    for seed in 0..20 {
        let mut b = bus(seed as usize % STOPS, BusPhase::Dwelling { remaining: 120 }, 20, 60);
        let mut rng = SeededRandom::new(seed);
        let mut last_battery = b.battery;

        for _ in 0..2000 {
            b.update(SIM_SECONDS_PER_TICK, STOPS, &mut rng);
            assert!(b.passengers <= PASSENGER_CAPACITY);
            assert!(b.battery >= BATTERY_FLOOR && b.battery <= 100);
            assert!(b.battery <= last_battery, "battery went up");
            last_battery = b.battery;
        }
    }
}

#[test]
fn test_high_draws_fill_bus_to_capacity() {
    let mut b = bus(0, BusPhase::Traveling { progress: 0.0 }, 12, 80);
    let mut rng = ScriptedRandom::constant(0.99);

    for _ in 0..2000 {
        b.update(SIM_SECONDS_PER_TICK, STOPS, &mut rng);
        assert!(b.passengers <= PASSENGER_CAPACITY);
    }

    assert_eq!(b.passengers, PASSENGER_CAPACITY);
    assert_eq!(b.battery, 80);
}

#[test]
fn test_low_draws_drain_battery_to_floor() {
    let mut b = bus(0, BusPhase::Traveling { progress: 0.0 }, 12, 85);
    let mut rng = ScriptedRandom::constant(0.0);

    for _ in 0..5000 {
        b.update(SIM_SECONDS_PER_TICK, STOPS, &mut rng);
    }

    assert_eq!(b.battery, BATTERY_FLOOR);
    assert_eq!(b.passengers, 0);
}

#[test]
fn test_new_bus_clamps_seed_values() {
    let b = bus(0, BusPhase::Dwelling { remaining: 900 }, 99, 2);
    assert_eq!(b.dwell_remaining(), DWELL_TIME);
    assert_eq!(b.passengers, PASSENGER_CAPACITY);
    assert_eq!(b.battery, BATTERY_FLOOR);
    assert_eq!(b.speed, 0);
}
