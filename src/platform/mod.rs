//! Platform abstraction layer
//!
//! The simulation core consumes its collaborators through these narrow
//! traits instead of ambient globals:
//! - `Clock`: monotonic milliseconds
//! - `Surface`: the drawing target (clear + filled circles)
//! - `FramePacer`: blocking wait for the next display frame
//! - `Reporter`: day summaries and end-of-run notification
//! - `ResizeEvents`: surface dimension changes
//!
//! Headless implementations (`ManualClock`, `RecordingSurface`,
//! `VecReporter`, `NoopPacer`) keep the whole loop testable without a
//! display.

use std::rc::Rc;
use std::cell::Cell;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use glam::Vec2;

use crate::Color;
use crate::sim::Counts;

/// Monotonic time source, millisecond resolution
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall clock backed by `std::time::Instant`
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-advanced clock for deterministic runs. Cloning shares the time
/// source, so a test can hold one handle and advance the simulator's.
#[derive(Clone, Default)]
pub struct ManualClock {
    ms: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, delta_ms: f64) {
        self.ms.set(self.ms.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.ms.get()
    }
}

/// A drawing surface of fixed (but resizable) pixel dimensions
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    fn resize(&mut self, width: f32, height: f32);
    fn fill_background(&mut self, color: Color);
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);
}

/// Surface that discards all draw calls (headless runs)
pub struct NullSurface {
    width: f32,
    height: f32,
}

impl NullSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Surface for NullSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn fill_background(&mut self, _color: Color) {}

    fn draw_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {}
}

/// Surface that records draw calls for assertions
pub struct RecordingSurface {
    width: f32,
    height: f32,
    /// Background fills since the last `take_frame`
    pub clears: Vec<Color>,
    /// Circles drawn since the last `take_frame`
    pub circles: Vec<(Vec2, f32, Color)>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            clears: Vec::new(),
            circles: Vec::new(),
        }
    }

    /// Drain and return the circles recorded so far
    pub fn take_frame(&mut self) -> Vec<(Vec2, f32, Color)> {
        self.clears.clear();
        std::mem::take(&mut self.circles)
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn fill_background(&mut self, color: Color) {
        self.clears.push(color);
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.circles.push((center, radius, color));
    }
}

/// Blocking wait until the next display frame is due
pub trait FramePacer {
    fn wait_next_frame(&mut self);
}

/// Sleeps toward a fixed refresh rate
pub struct FixedPacer {
    frame: Duration,
    last: Option<Instant>,
}

impl FixedPacer {
    pub fn new(fps: f64) -> Self {
        Self {
            frame: Duration::from_secs_f64(1.0 / fps),
            last: None,
        }
    }
}

impl FramePacer for FixedPacer {
    fn wait_next_frame(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last {
            let next = last + self.frame;
            if next > now {
                std::thread::sleep(next - now);
            }
        }
        self.last = Some(Instant::now());
    }
}

/// Never waits. Pair with `ManualClock` for deterministic loops.
pub struct NoopPacer;

impl FramePacer for NoopPacer {
    fn wait_next_frame(&mut self) {}
}

/// Pacer that advances a shared `ManualClock` instead of sleeping, so
/// `Simulator::run` terminates deterministically in tests.
pub struct TickingPacer {
    clock: ManualClock,
    step_ms: f64,
}

impl TickingPacer {
    pub fn new(clock: ManualClock, step_ms: f64) -> Self {
        Self { clock, step_ms }
    }
}

impl FramePacer for TickingPacer {
    fn wait_next_frame(&mut self) {
        self.clock.advance(self.step_ms);
    }
}

/// Fire-and-forget side channel for summary counts
pub trait Reporter {
    /// One simulated day completed
    fn day_summary(&mut self, day: u32, counts: Counts);
    /// The run terminated
    fn finished(&mut self, day: u32, counts: Counts);
}

/// Reports through the `log` crate
pub struct LogReporter;

impl Reporter for LogReporter {
    fn day_summary(&mut self, day: u32, counts: Counts) {
        log::info!(
            "day {}: healthy={} infected={} recovered={}",
            day,
            counts.healthy,
            counts.infected,
            counts.recovered
        );
    }

    fn finished(&mut self, day: u32, counts: Counts) {
        log::info!(
            "run ended on day {}: healthy={} infected={} recovered={}",
            day,
            counts.healthy,
            counts.infected,
            counts.recovered
        );
    }
}

/// Captures reports for assertions
#[derive(Default)]
pub struct VecReporter {
    pub days: Vec<(u32, Counts)>,
    pub finished: Option<(u32, Counts)>,
}

impl VecReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for VecReporter {
    fn day_summary(&mut self, day: u32, counts: Counts) {
        self.days.push((day, counts));
    }

    fn finished(&mut self, day: u32, counts: Counts) {
        self.finished = Some((day, counts));
    }
}

/// Surface dimension changes, polled once per frame
pub trait ResizeEvents {
    /// The most recent pending resize, if any. Drains the queue.
    fn poll_resize(&mut self) -> Option<(f32, f32)>;
}

/// No resize source (fixed-size surfaces)
pub struct NoResize;

impl ResizeEvents for NoResize {
    fn poll_resize(&mut self) -> Option<(f32, f32)> {
        None
    }
}

/// Sender half of a resize channel
pub struct ResizeSender {
    tx: mpsc::Sender<(f32, f32)>,
}

impl ResizeSender {
    pub fn send(&self, width: f32, height: f32) {
        // Receiver gone means the run is over; nothing to do
        let _ = self.tx.send((width, height));
    }
}

/// Receiver half: latest-wins resize queue
pub struct ResizeChannel {
    rx: mpsc::Receiver<(f32, f32)>,
}

impl ResizeChannel {
    pub fn pair() -> (ResizeSender, ResizeChannel) {
        let (tx, rx) = mpsc::channel();
        (ResizeSender { tx }, ResizeChannel { rx })
    }
}

impl ResizeEvents for ResizeChannel {
    fn poll_resize(&mut self) -> Option<(f32, f32)> {
        let mut latest = None;
        while let Ok(dims) = self.rx.try_recv() {
            latest = Some(dims);
        }
        latest
    }
}
