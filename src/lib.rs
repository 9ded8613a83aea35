//! Petri - an agent-based epidemic simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (people, collisions, day ticks)
//! - `runner`: Fixed-timestep frame loop driving the simulation
//! - `platform`: Clock/surface/pacer/reporter abstractions
//! - `config`: Data-driven simulation parameters

pub mod config;
pub mod platform;
pub mod runner;
pub mod sim;

pub use config::SimConfig;
pub use runner::Simulator;

/// Simulation constants
pub mod consts {
    /// Default simulation rate (steps per second)
    pub const DEFAULT_FPS: f64 = 60.0;
    /// One simulated day per real second
    pub const DAY_MS: f64 = 1000.0;
    /// Day ticks spent infected before the recovery check passes
    pub const RECOVERY_DAYS: u32 = 15;
    /// Cap on per-frame elapsed credit (seconds) so a stalled frame
    /// (tab in background, debugger pause) can't queue unbounded catch-up
    pub const MAX_FRAME_CREDIT_SECS: f64 = 1.0;

    /// World defaults
    pub const DEFAULT_WIDTH: f32 = 700.0;
    pub const DEFAULT_HEIGHT: f32 = 400.0;

    /// Person defaults
    pub const PERSON_RADIUS: f32 = 6.0;
    /// Velocity components are drawn from [-MAX_COMPONENT_SPEED, +MAX_COMPONENT_SPEED]
    pub const MAX_COMPONENT_SPEED: f32 = 3.0;
}

/// An RGB color for the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}
