//! Command line configuration

use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};

use crate::simulation::{CLOCK_TICK_MS, SIM_SECONDS_PER_TICK, SIM_TICK_MS};

/// Which dashboard view to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// Map, bus cards and stop timeline, refreshed every tick
    Live,
    /// Stop and facility directory
    Stops,
    /// ETA of every bus to every stop
    Eta,
}

#[derive(Debug, Parser)]
#[command(name = "ebus_tracker")]
#[command(about = "Simulated campus electric-bus tracker")]
pub struct Cli {
    /// Number of simulation ticks to run (0 runs until interrupted)
    #[arg(long, default_value = "20")]
    pub ticks: u64,

    /// Wall-clock milliseconds between simulation ticks
    #[arg(long, default_value_t = SIM_TICK_MS)]
    pub tick_ms: u64,

    /// Simulated seconds that pass per tick
    #[arg(long, default_value_t = SIM_SECONDS_PER_TICK)]
    pub sim_seconds: u32,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// View to print
    #[arg(long, value_enum, default_value_t = View::Live)]
    pub view: View,

    /// Print JSON snapshots instead of text
    #[arg(long)]
    pub json: bool,

    /// Run ticks back to back without waiting on the wall clock
    #[arg(long)]
    pub fast: bool,
}

/// Validated settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// `None` runs forever
    pub ticks: Option<u64>,
    pub tick_period: Duration,
    pub clock_period: Duration,
    pub sim_seconds_per_tick: u32,
    pub seed: Option<u64>,
    pub view: View,
    pub json: bool,
    pub fast: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticks: Some(20),
            tick_period: Duration::from_millis(SIM_TICK_MS),
            clock_period: Duration::from_millis(CLOCK_TICK_MS),
            sim_seconds_per_tick: SIM_SECONDS_PER_TICK,
            seed: None,
            view: View::Live,
            json: false,
            fast: false,
        }
    }
}

impl Cli {
    pub fn into_config(self) -> Result<RunConfig> {
        if self.tick_ms == 0 {
            bail!("--tick-ms must be greater than zero");
        }
        if self.sim_seconds == 0 {
            bail!("--sim-seconds must be greater than zero");
        }

        Ok(RunConfig {
            ticks: (self.ticks > 0).then_some(self.ticks),
            tick_period: Duration::from_millis(self.tick_ms),
            clock_period: Duration::from_millis(CLOCK_TICK_MS),
            sim_seconds_per_tick: self.sim_seconds,
            seed: self.seed,
            view: self.view,
            json: self.json,
            fast: self.fast,
        })
    }
}
