//! Simulation state: phase machine, timers, day counter
//!
//! Everything the fixed-step loop mutates lives here; the runner owns one
//! `SimState` and is the only mutator.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::population::Population;
use crate::config::SimConfig;

/// Lifecycle of a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Not yet started (or reset)
    Idle,
    /// Stepping every frame
    Running,
    /// Terminated: day limit hit, infection died out, or nobody healthy left
    Ended,
}

/// Counts snapshot emitted at each day boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub day: u32,
    pub counts: super::population::Counts,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: Phase,
    /// World bounds; updated on resize events
    pub width: f32,
    pub height: f32,
    pub population: Population,
    /// Fixed step duration in seconds
    pub step_secs: f64,
    /// Fractional-second credit toward sub-steps; never negative
    pub accumulator_secs: f64,
    /// Raw elapsed milliseconds toward the next day boundary
    pub day_timer_ms: f64,
    /// Completed day count
    pub day: u32,
    /// 0 = unbounded, run until the epidemic resolves
    pub max_days: u32,
    /// Clock reading at the previous frame (ms)
    pub last_time_ms: f64,
}

impl SimState {
    /// An idle state with no population (before the first `start`)
    pub fn idle(config: &SimConfig) -> Self {
        Self {
            seed: 0,
            rng: Pcg32::seed_from_u64(0),
            phase: Phase::Idle,
            width: config.width,
            height: config.height,
            population: Population::empty(),
            step_secs: 1.0 / config.fps,
            accumulator_secs: 0.0,
            day_timer_ms: 0.0,
            day: 0,
            max_days: config.max_days,
            last_time_ms: 0.0,
        }
    }

    /// Seed a fresh run. `confinement` gates the configured confined count.
    pub fn new(config: &SimConfig, seed: u64, confinement: bool, now_ms: f64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let confined = if confinement { config.confined_count } else { 0 };
        let population = Population::seed(
            config.population,
            config.initial_infected,
            confined,
            config.width,
            config.height,
            &mut rng,
        );
        Self {
            seed,
            rng,
            phase: Phase::Running,
            width: config.width,
            height: config.height,
            population,
            step_secs: 1.0 / config.fps,
            accumulator_secs: 0.0,
            day_timer_ms: 0.0,
            day: 0,
            max_days: config.max_days,
            last_time_ms: now_ms,
        }
    }
}
