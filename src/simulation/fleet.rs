//! The fleet that ties stops, buses and the random source together
//!
//! The fleet owns all mutable simulation state. Each [`SimFleet::tick`]
//! advances every bus by the same slice of simulated time, one after another.

use log::info;
use serde::Serialize;

use super::bus::{BusPhase, BusUpdateResult, SimBus};
use super::eta::eta_seconds;
use super::random::{SeededRandom, ThreadRandom, TickRandom};
use super::stop::{campus_stops, SimStop};
use super::types::{BusId, Position, SimId, StopIndex};

/// Running totals collected while ticking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FleetStats {
    pub ticks: u64,
    pub arrivals: u64,
    pub departures: u64,
}

/// A bus expected at a stop, with its ETA in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Arrival {
    pub bus: BusId,
    pub eta: u32,
}

/// What a single stop looks like on the arrival timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StopArrivals {
    pub stop: StopIndex,
    /// Bus parked here and its remaining dwell seconds
    pub dwelling: Option<(BusId, u32)>,
    /// Other buses heading here, soonest first
    pub approaching: Vec<Arrival>,
}

impl StopArrivals {
    pub fn next_arrival(&self) -> Option<&Arrival> {
        self.approaching.first()
    }
}

/// The main simulation state
pub struct SimFleet {
    /// Stops in driving order
    pub stops: Vec<SimStop>,

    /// Buses, ordered by id
    pub buses: Vec<SimBus>,

    /// Simulated seconds since start
    pub time: u64,

    pub stats: FleetStats,

    rng: Box<dyn TickRandom>,
}

impl SimFleet {
    pub fn new(stops: Vec<SimStop>, buses: Vec<SimBus>, rng: Box<dyn TickRandom>) -> Self {
        Self {
            stops,
            buses,
            time: 0,
            stats: FleetStats::default(),
            rng,
        }
    }

    /// The campus loop with its three buses, drawing from the thread RNG
    pub fn create_campus_fleet() -> Self {
        Self::with_random(Box::new(ThreadRandom))
    }

    /// The campus loop with a seeded RNG for reproducible runs
    pub fn create_campus_fleet_with_seed(seed: u64) -> Self {
        Self::with_random(Box::new(SeededRandom::new(seed)))
    }

    /// The campus loop driven by any random source
    pub fn with_random(rng: Box<dyn TickRandom>) -> Self {
        Self::new(campus_stops(), initial_buses(), rng)
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn bus(&self, id: BusId) -> Option<&SimBus> {
        self.buses.iter().find(|b| b.id == id)
    }

    pub fn stop(&self, index: StopIndex) -> Option<&SimStop> {
        self.stops.get(index.0)
    }

    /// Main simulation tick
    ///
    /// Advances every bus by `elapsed_secs` and returns the transitions that
    /// happened during the tick.
    pub fn tick(&mut self, elapsed_secs: u32) -> Vec<(BusId, BusUpdateResult)> {
        self.time += u64::from(elapsed_secs);
        self.stats.ticks += 1;

        let stop_count = self.stops.len();
        if stop_count == 0 {
            return Vec::new();
        }

        let mut events = Vec::new();
        for bus in &mut self.buses {
            let result = bus.update(elapsed_secs, stop_count, self.rng.as_mut());
            match result {
                BusUpdateResult::ArrivedAtStop(stop) => {
                    self.stats.arrivals += 1;
                    let stop_name = self.stops.get(stop.0).map_or("?", |s| s.name_en.as_str());
                    info!(
                        "{} arrived at {} ({}), {} passengers aboard",
                        bus.code, stop_name, stop.0 + 1, bus.passengers
                    );
                    events.push((bus.id, result));
                }
                BusUpdateResult::Departed(stop) => {
                    self.stats.departures += 1;
                    let stop_name = self.stops.get(stop.0).map_or("?", |s| s.name_en.as_str());
                    info!("{} departed {} at {} km/h", bus.code, stop_name, bus.speed);
                    events.push((bus.id, result));
                }
                BusUpdateResult::Continue => {}
            }
        }
        events
    }

    /// The bus currently parked at `stop`, if any
    pub fn dwelling_bus_at(&self, stop: StopIndex) -> Option<&SimBus> {
        self.buses
            .iter()
            .find(|b| b.current_stop == stop && b.is_dwelling())
    }

    /// Arrival timeline entry for one stop
    ///
    /// The parked bus is reported separately and never listed as approaching.
    /// Approaching buses are sorted by ETA, ties broken by bus id.
    pub fn arrivals_at(&self, stop: StopIndex) -> StopArrivals {
        let stop_count = self.stops.len();
        let dwelling = self
            .dwelling_bus_at(stop)
            .map(|b| (b.id, b.dwell_remaining()));

        let mut approaching: Vec<Arrival> = self
            .buses
            .iter()
            .filter(|b| !(b.current_stop == stop && b.is_dwelling()))
            .filter_map(|b| {
                eta_seconds(b, stop, stop_count).map(|eta| Arrival { bus: b.id, eta })
            })
            .filter(|a| a.eta > 0)
            .collect();
        approaching.sort_by_key(|a| (a.eta, a.bus));

        StopArrivals {
            stop,
            dwelling,
            approaching,
        }
    }

    /// Arrival timeline for every stop, in route order
    pub fn timeline(&self) -> Vec<StopArrivals> {
        (0..self.stops.len())
            .map(|i| self.arrivals_at(StopIndex(i)))
            .collect()
    }

    /// Map position of the stop at `index` on the schematic loop
    pub fn stop_map_position(&self, index: StopIndex) -> Position {
        loop_position(index.0, self.stops.len())
    }

    /// Map position of a bus, interpolated along its segment while travelling
    pub fn bus_map_position(&self, bus: &SimBus) -> Position {
        let current = self.stop_map_position(bus.current_stop);
        if self.stops.is_empty() {
            return current;
        }
        match bus.phase {
            BusPhase::Dwelling { .. } => current,
            BusPhase::Traveling { progress } => {
                let next = self.stop_map_position(bus.next_stop(self.stops.len()));
                current.lerp(&next, progress as f32)
            }
        }
    }

    /// Render the schematic route map as text
    pub fn render_map(&self) -> String {
        let width = MAP_WIDTH;
        let height = MAP_HEIGHT;
        let mut grid = vec![vec![' '; width]; height];

        let to_grid = |pos: Position| -> (usize, usize) {
            let col = (pos.x / MAP_VIEW_WIDTH * (width - 1) as f32).round().max(0.0) as usize;
            let row = (pos.y / MAP_VIEW_HEIGHT * (height - 1) as f32).round().max(0.0) as usize;
            (row.min(height - 1), col.min(width - 1))
        };

        let n = self.stops.len();

        // Draw route segments
        for i in 0..n {
            let (start_row, start_col) = to_grid(loop_position(i, n));
            let (end_row, end_col) = to_grid(loop_position((i + 1) % n, n));

            // Simple line drawing (Bresenham-like)
            let dx = (end_col as i32 - start_col as i32).abs();
            let dy = (end_row as i32 - start_row as i32).abs();
            let sx = if start_col < end_col { 1 } else { -1 };
            let sy = if start_row < end_row { 1 } else { -1 };

            let mut err = dx - dy;
            let mut x = start_col as i32;
            let mut y = start_row as i32;

            loop {
                if x >= 0 && x < width as i32 && y >= 0 && y < height as i32 {
                    let cell = &mut grid[y as usize][x as usize];
                    if *cell == ' ' {
                        *cell = '.';
                    }
                }

                if x == end_col as i32 && y == end_row as i32 {
                    break;
                }

                let e2 = 2 * err;
                if e2 > -dy {
                    err -= dy;
                    x += sx;
                }
                if e2 < dx {
                    err += dx;
                    y += sy;
                }
            }
        }

        // Draw stops, marking the ones with a parked bus
        for stop in &self.stops {
            let (row, col) = to_grid(self.stop_map_position(stop.index));
            grid[row][col] = if self.dwelling_bus_at(stop.index).is_some() {
                '@'
            } else {
                'o'
            };
        }

        // Draw buses on the road
        for bus in self.buses.iter().filter(|b| !b.is_dwelling()) {
            let (row, col) = to_grid(self.bus_map_position(bus));
            let marker = char::from_digit((bus.id.0 .0 % 10) as u32, 10).unwrap_or('B');
            if grid[row][col] == ' ' || grid[row][col] == '.' {
                grid[row][col] = marker;
            }
        }

        let mut out = String::new();
        out.push_str("=== Route Map ===\n");
        out.push_str("Legend: o=Stop, @=Stop with parked bus, 1-3=Bus on the road, .=Route\n\n");
        for row in &grid {
            let line: String = row.iter().collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }

}

/// Schematic map viewport, in map units
const MAP_VIEW_WIDTH: f32 = 600.0;
const MAP_VIEW_HEIGHT: f32 = 310.0;

/// Character grid the viewport is rasterised into
const MAP_WIDTH: usize = 61;
const MAP_HEIGHT: usize = 17;

/// Stops are laid out clockwise on an ellipse, the first one at the top
fn loop_position(index: usize, stop_count: usize) -> Position {
    if stop_count == 0 {
        return Position::default();
    }
    let angle = (index as f32 / stop_count as f32) * std::f32::consts::TAU
        - std::f32::consts::FRAC_PI_2;
    let (cx, cy, rx, ry) = (300.0, 155.0, 170.0, 95.0);
    Position::new(cx + rx * angle.cos(), cy + ry * angle.sin())
}

/// The three buses as they stand when service starts
pub fn initial_buses() -> Vec<SimBus> {
    vec![
        SimBus::new(
            BusId(SimId(1)),
            "รถเมล์ที่ 1",
            "รถคัน 1",
            StopIndex(0),
            BusPhase::Dwelling { remaining: 180 },
            0,
            12,
            85,
        ),
        SimBus::new(
            BusId(SimId(2)),
            "รถเมล์ที่ 2",
            "รถคัน 2",
            StopIndex(3),
            BusPhase::Traveling { progress: 0.4 },
            22,
            8,
            68,
        ),
        SimBus::new(
            BusId(SimId(3)),
            "รถเมล์ที่ 3",
            "รถคัน 3",
            StopIndex(7),
            BusPhase::Dwelling { remaining: 60 },
            0,
            15,
            48,
        ),
    ]
}
