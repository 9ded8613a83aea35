//! Data-driven simulation parameters
//!
//! Loaded from JSON when a path is given; anything missing or malformed
//! falls back to defaults, logged rather than raised.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Simulation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// World width in pixels
    pub width: f32,
    /// World height in pixels
    pub height: f32,
    /// Total population, fixed at creation
    pub population: usize,
    /// People seeded Infected at start
    pub initial_infected: usize,
    /// People flagged confined when the confinement policy is on
    pub confined_count: usize,
    /// Day limit; 0 = unbounded, run until the epidemic resolves
    pub max_days: u32,
    /// Fixed simulation rate (steps per second)
    pub fps: f64,
    /// Fixed RNG seed for reproducible runs; None = derive from the clock
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            population: 200,
            initial_infected: 3,
            confined_count: 0,
            max_days: 0,
            fps: DEFAULT_FPS,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Load from a JSON file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    log::info!("loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("bad config {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("no config at {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write as pretty JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}
