//! Random sources for the tick simulator
//!
//! Speed jitter, passenger drift and battery drain all draw from a
//! [`TickRandom`], so tests can swap the live generator for a fixed sequence.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

/// A source of uniform draws in `[0, 1)`
pub trait TickRandom {
    /// Next uniform value in `[0, 1)`
    fn next_unit(&mut self) -> f64;

    /// Returns true with probability `p`
    fn chance(&mut self, p: f64) -> bool {
        self.next_unit() < p
    }

    /// Uniform integer in `[lo, hi]` (both inclusive)
    fn int_between(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo + 1) as f64;
        let offset = (self.next_unit() * span).floor() as i32;
        lo + offset.min(hi - lo)
    }
}

/// Draws from the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl TickRandom for ThreadRandom {
    fn next_unit(&mut self) -> f64 {
        rand::rng().random_range(0.0..1.0)
    }
}

/// Seeded RNG for reproducible simulations
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl TickRandom for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.random_range(0.0..1.0)
    }
}

/// Replays a fixed list of draws, wrapping around at the end
///
/// Values are clamped into `[0, 1)`. An empty script always yields `0.0`.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// A script that always returns the same value
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// How many draws have been taken so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl TickRandom for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
