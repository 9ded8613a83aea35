//! Deterministic simulation module
//!
//! All epidemic logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by position in the population vector)
//! - No rendering or platform dependencies

pub mod person;
pub mod population;
pub mod state;
pub mod tick;

pub use person::{Person, Status, color_for};
pub use population::{Counts, Population};
pub use state::{DaySummary, Phase, SimState};
pub use tick::frame;
