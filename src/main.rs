use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use ebus_tracker::config::{Cli, RunConfig, View};
use ebus_tracker::dashboard::{self, FleetSnapshot};
use ebus_tracker::simulation::{format_clock, SimFleet};
use ebus_tracker::timer::{sleep_until_next, Timer};

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,ebus_tracker=info"),
    )
    .init();

    let config = Cli::parse().into_config()?;
    debug!("Run configuration: {:?}", config);

    let mut fleet = match config.seed {
        Some(seed) => SimFleet::create_campus_fleet_with_seed(seed),
        None => SimFleet::create_campus_fleet(),
    };

    match config.view {
        View::Live => run_live(&config, &mut fleet),
        View::Stops => emit(&dashboard::render_stop_directory(&fleet)),
        View::Eta => emit(&dashboard::render_eta_matrix(&fleet)),
    }
}

fn wall_clock() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

fn emit(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", text).context("Failed to write to stdout")?;
    stdout.flush().context("Failed to flush stdout")
}

fn emit_fleet(config: &RunConfig, fleet: &SimFleet, clock: &str) -> Result<()> {
    if config.json {
        emit(&FleetSnapshot::capture(fleet, clock).to_json()?)
    } else {
        emit(&dashboard::render_live(fleet, clock))
    }
}

/// Drive the simulation tick timer and the header clock timer until the
/// configured number of ticks has run
fn run_live(config: &RunConfig, fleet: &mut SimFleet) -> Result<()> {
    info!(
        "Running campus e-bus simulation: {} simulated seconds every {} ms",
        config.sim_seconds_per_tick,
        config.tick_period.as_millis()
    );

    let start = Instant::now();
    let mut tick_timer = Timer::new(config.tick_period);
    let mut clock_timer = Timer::new(config.clock_period);
    let mut clock = wall_clock();
    let mut ticks_run: u64 = 0;
    let limit_reached = |ticks_run: u64| config.ticks.is_some_and(|limit| ticks_run >= limit);

    emit_fleet(config, fleet, &clock)?;

    while !limit_reached(ticks_run) {
        let now = if config.fast {
            // Jump straight to the next deadline instead of sleeping
            tick_timer.next_due().min(clock_timer.next_due())
        } else {
            let wait = sleep_until_next(&[&tick_timer, &clock_timer], start.elapsed());
            if wait > Duration::ZERO {
                std::thread::sleep(wait);
            }
            start.elapsed()
        };

        if clock_timer.fire(now) > 0 {
            clock = wall_clock();
        }

        let due = tick_timer.fire(now);
        if due == 0 {
            continue;
        }

        for _ in 0..due {
            if limit_reached(ticks_run) {
                break;
            }
            fleet.tick(config.sim_seconds_per_tick);
            ticks_run += 1;
        }

        emit_fleet(config, fleet, &clock)?;
    }

    log_summary(fleet);
    Ok(())
}

fn log_summary(fleet: &SimFleet) {
    info!("=== SIMULATION COMPLETE ===");
    info!("Ticks run: {}", fleet.stats.ticks);
    info!("Simulated time: {}", format_clock(u32::try_from(fleet.time).unwrap_or(u32::MAX)));
    info!("Total arrivals: {}", fleet.stats.arrivals);
    info!("Total departures: {}", fleet.stats.departures);
    for bus in &fleet.buses {
        info!(
            "{}: stop P{}, {} passengers, battery {}%",
            bus.code,
            bus.current_stop.0 + 1,
            bus.passengers,
            bus.battery
        );
    }
}
