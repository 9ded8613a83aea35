//! Petri entry point
//!
//! Headless native run: day summaries go to the log, drawing goes nowhere.
//! Usage: `petri [config.json] [--confined]`

use std::path::Path;

use petri::SimConfig;
use petri::Simulator;
use petri::platform::{FixedPacer, LogReporter, NoResize, NullSurface, SystemClock};

fn main() {
    env_logger::init();

    let mut config = SimConfig::default();
    let mut confined = false;
    for arg in std::env::args().skip(1) {
        if arg == "--confined" {
            confined = true;
        } else {
            config = SimConfig::load(Path::new(&arg));
        }
    }

    log::info!(
        "petri starting: {}x{} world, {} people",
        config.width,
        config.height,
        config.population
    );

    let surface = NullSurface::new(config.width, config.height);
    let pacer = FixedPacer::new(config.fps);
    let mut sim = Simulator::new(
        config,
        SystemClock::new(),
        surface,
        pacer,
        LogReporter,
        NoResize,
    );

    if confined {
        sim.restart(true);
    } else {
        sim.start();
    }
    sim.run();

    let counts = sim.state().population.counts();
    log::info!(
        "final: day={} healthy={} infected={} recovered={}",
        sim.state().day,
        counts.healthy,
        counts.infected,
        counts.recovered
    );
}
