//! Fixed timestep frame advance
//!
//! Converts wall-clock elapsed time into whole simulation sub-steps plus
//! day-boundary ticks, exactly one mutator, no parallelism.

use super::state::{DaySummary, Phase, SimState};
use crate::consts::{DAY_MS, MAX_FRAME_CREDIT_SECS};

/// Advance the simulation by one displayed frame.
///
/// Elapsed credit is clamped to one real second so a stalled frame can't
/// queue unbounded catch-up sub-steps. The accumulator is decremented by
/// exactly one step per sub-step and never goes negative.
///
/// Returns a summary for each day boundary crossed (at most one per frame,
/// since the day timer resets on the first crossing).
pub fn frame(state: &mut SimState, now_ms: f64) -> Vec<DaySummary> {
    let mut summaries = Vec::new();
    if state.phase != Phase::Running {
        state.last_time_ms = now_ms;
        return summaries;
    }

    let elapsed_ms = now_ms - state.last_time_ms;
    state.accumulator_secs += (elapsed_ms / 1000.0).min(MAX_FRAME_CREDIT_SECS);
    state.day_timer_ms += elapsed_ms;

    while state.accumulator_secs > state.step_secs && state.phase == Phase::Running {
        state.accumulator_secs -= state.step_secs;

        let day_boundary = state.day_timer_ms > DAY_MS;
        if day_boundary {
            state.day_timer_ms = 0.0;
        }

        create(state);
        step(state, day_boundary, &mut summaries);
    }

    state.last_time_ms = now_ms;
    summaries
}

/// Per-step entity creation hook. Nothing spawns mid-run in this
/// simulation; the hook stays so the create -> update -> draw ordering
/// of the loop is explicit.
fn create(_state: &mut SimState) {}

/// One sub-step: population update, then the day tick if this sub-step
/// crossed a day boundary.
fn step(state: &mut SimState, day_boundary: bool, summaries: &mut Vec<DaySummary>) {
    state
        .population
        .update(state.width, state.height, &mut state.rng);

    if day_boundary {
        state.population.tick_day();
        state.day += 1;
        let counts = state.population.counts();
        summaries.push(DaySummary {
            day: state.day,
            counts,
        });

        let day_limit = state.max_days >= 1 && state.day >= state.max_days;
        if day_limit || counts.infected == 0 || counts.healthy == 0 {
            state.phase = Phase::Ended;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;

    fn running_state(config: &SimConfig, seed: u64) -> SimState {
        SimState::new(config, seed, false, 0.0)
    }

    #[test]
    fn test_substep_count_matches_elapsed() {
        let config = SimConfig::default(); // 60 Hz
        let mut state = running_state(&config, 1);

        // 100 ms -> 0.1 s of credit -> 6 sub-steps at 1/60 s, 0.1 - 6/60 left
        frame(&mut state, 100.0);
        assert!((state.accumulator_secs - (0.1 - 6.0 / 60.0)).abs() < 1e-9);
        assert!(state.accumulator_secs >= 0.0);
        assert_eq!(state.last_time_ms, 100.0);
    }

    #[test]
    fn test_elapsed_clamped_to_one_second() {
        let config = SimConfig::default();
        let mut state = running_state(&config, 1);

        // A 10-second stall credits only 1 second of sub-steps
        frame(&mut state, 10_000.0);
        assert!(state.accumulator_secs < 1.0);
        // 60 steps' worth consumed, not 600: the day timer saw the raw
        // elapsed and crossed exactly one boundary
        assert_eq!(state.day, 1);
    }

    #[test]
    fn test_day_boundary_after_one_second() {
        let config = SimConfig::default();
        let mut state = running_state(&config, 3);

        // Walk up in 100 ms frames; the day timer crosses 1000 ms on the
        // frame that lands past it
        let mut summaries = Vec::new();
        for i in 1..=11 {
            summaries.extend(frame(&mut state, i as f64 * 100.0));
        }
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].day, 1);
        assert_eq!(state.day, 1);
    }

    #[test]
    fn test_zero_infected_ends_at_first_day_tick() {
        let config = SimConfig {
            initial_infected: 0,
            max_days: 0,
            ..SimConfig::default()
        };
        let mut state = running_state(&config, 5);

        frame(&mut state, 1100.0);
        assert_eq!(state.phase, Phase::Ended);
        assert_eq!(state.day, 1);
    }

    #[test]
    fn test_max_days_terminates_with_active_infection() {
        let config = SimConfig {
            population: 30,
            initial_infected: 10,
            max_days: 1,
            ..SimConfig::default()
        };
        let mut state = running_state(&config, 5);

        frame(&mut state, 1100.0);
        assert_eq!(state.phase, Phase::Ended);
        assert!(state.population.counts().infected > 0);
    }

    #[test]
    fn test_ended_state_does_not_step() {
        let config = SimConfig {
            initial_infected: 0,
            ..SimConfig::default()
        };
        let mut state = running_state(&config, 5);
        frame(&mut state, 1100.0);
        assert_eq!(state.phase, Phase::Ended);

        let day = state.day;
        let summaries = frame(&mut state, 5000.0);
        assert!(summaries.is_empty());
        assert_eq!(state.day, day);
    }

    #[test]
    fn test_counts_conserved_over_many_frames() {
        let config = SimConfig {
            population: 40,
            initial_infected: 4,
            ..SimConfig::default()
        };
        let mut state = running_state(&config, 11);

        let mut now = 0.0;
        while state.phase == Phase::Running && now < 30_000.0 {
            now += 16.0;
            frame(&mut state, now);
            assert_eq!(state.population.counts().total(), 40);
            assert!(state.accumulator_secs >= 0.0);
        }
    }

    #[test]
    fn test_epidemic_runs_to_completion() {
        // Dense population, unbounded days: the run must end with either
        // no infected left or no healthy left
        let config = SimConfig {
            width: 200.0,
            height: 150.0,
            population: 25,
            initial_infected: 2,
            max_days: 0,
            ..SimConfig::default()
        };
        let mut state = running_state(&config, 77);

        let mut now = 0.0;
        while state.phase == Phase::Running && now < 600_000.0 {
            now += 16.0;
            frame(&mut state, now);
        }
        assert_eq!(state.phase, Phase::Ended);
        let counts = state.population.counts();
        assert!(counts.infected == 0 || counts.healthy == 0);
    }
}
