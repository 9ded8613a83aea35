//! The simulator: owns the clock, the surface and the population, and
//! drives create -> update -> draw at a fixed timestep
//!
//! All collaborators arrive through the constructor; there are no ambient
//! globals. The frame loop is an explicit blocking loop over the pacer
//! rather than a self-rescheduling callback, and it is the only mutator of
//! simulation state, so no synchronization is needed.

use crate::Color;
use crate::config::SimConfig;
use crate::platform::{Clock, FramePacer, Reporter, ResizeEvents, Surface};
use crate::sim::{self, Phase, SimState, color_for};

/// Surface clear color between frames
const BACKGROUND: Color = Color::rgb(238, 238, 238);

/// Fixed-step simulation driver
pub struct Simulator<C, S, P, R, E> {
    clock: C,
    surface: S,
    pacer: P,
    reporter: R,
    resize: E,
    config: SimConfig,
    /// Whether the confinement policy applies on the next (re)start
    confinement: bool,
    state: SimState,
    end_notified: bool,
}

impl<C, S, P, R, E> Simulator<C, S, P, R, E>
where
    C: Clock,
    S: Surface,
    P: FramePacer,
    R: Reporter,
    E: ResizeEvents,
{
    pub fn new(config: SimConfig, clock: C, surface: S, pacer: P, reporter: R, resize: E) -> Self {
        let state = SimState::idle(&config);
        Self {
            clock,
            surface,
            pacer,
            reporter,
            resize,
            config,
            confinement: false,
            state,
            end_notified: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Seed the population and begin running.
    ///
    /// Returns `false` (and changes nothing) if already running - the one
    /// idempotency guard in the system, not an error.
    pub fn start(&mut self) -> bool {
        if self.state.phase == Phase::Running {
            return false;
        }

        let seed = self.config.seed.unwrap_or_else(|| self.clock.now_ms() as u64);
        let now = self.clock.now_ms();
        self.state = SimState::new(&self.config, seed, self.confinement, now);
        self.end_notified = false;
        log::info!(
            "simulation started: seed={} population={} infected={} confined={}",
            seed,
            self.config.population,
            self.config.initial_infected,
            if self.confinement { self.config.confined_count } else { 0 },
        );
        true
    }

    /// Block until the run terminates, one frame per pacer tick
    pub fn run(&mut self) {
        while self.state.phase == Phase::Running {
            self.frame();
            self.pacer.wait_next_frame();
        }
    }

    /// One displayed frame: resize poll, sub-steps, day summaries, draw
    pub fn frame(&mut self) {
        if let Some((width, height)) = self.resize.poll_resize() {
            self.surface.resize(width, height);
            self.state.width = width;
            self.state.height = height;
            self.state.population.request_relocate();
            log::debug!("surface resized to {}x{}", width, height);
        }

        let now = self.clock.now_ms();
        let summaries = sim::frame(&mut self.state, now);
        for summary in summaries {
            self.reporter.day_summary(summary.day, summary.counts);
        }

        self.draw();

        if self.state.phase == Phase::Ended {
            self.notify_end();
        }
    }

    /// Terminate the run and notify the presentation layer
    pub fn stop(&mut self) {
        if self.state.phase == Phase::Running {
            self.state.phase = Phase::Ended;
            self.notify_end();
        }
    }

    /// Stop if running, then reseed and start with the given confinement
    /// policy applied to the configured count of new people.
    pub fn restart(&mut self, confinement: bool) -> bool {
        if self.state.phase == Phase::Running {
            self.stop();
        }
        self.confinement = confinement;
        self.start()
    }

    fn draw(&mut self) {
        self.surface.fill_background(BACKGROUND);
        for person in self.state.population.people() {
            self.surface
                .draw_circle(person.pos, person.radius, color_for(person.status));
        }
    }

    fn notify_end(&mut self) {
        if !self.end_notified {
            self.end_notified = true;
            self.reporter
                .finished(self.state.day, self.state.population.counts());
        }
    }
}
