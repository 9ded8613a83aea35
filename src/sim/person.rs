//! A single person: position, velocity, epidemic status
//!
//! The collision response here is deliberately non-physical: the overlap test
//! compares squared distance against the squared *diameter* (so contact fires
//! at roughly twice the geometric range), and the velocity exchange is
//! asymmetric (one side decremented, the other assigned). Both are observed
//! behavior that downstream tests pin down; do not "correct" them.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Color;
use crate::consts::{MAX_COMPONENT_SPEED, RECOVERY_DAYS};

/// Epidemic status. Transitions are one-way:
/// Healthy -> Infected -> Recovered, no re-infection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Healthy,
    Infected,
    Recovered,
}

/// Fill color for a status. Pure function, no stored color state.
pub const fn color_for(status: Status) -> Color {
    match status {
        Status::Healthy => Color::rgb(137, 196, 244),
        Status::Infected => Color::rgb(217, 83, 79),
        Status::Recovered => Color::rgb(146, 120, 166),
    }
}

/// A person entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Positive and constant for the person's lifetime
    pub radius: f32,
    pub status: Status,
    /// Confined people never move but still collide, infect and get drawn
    pub confined: bool,
    /// Day ticks spent infected; reset to 0 on infection
    pub infected_days: u32,
}

impl Person {
    /// Spawn at a random in-bounds position with a random velocity
    pub fn random(width: f32, height: f32, radius: f32, rng: &mut impl Rng) -> Self {
        Self {
            pos: random_pos(width, height, radius, rng),
            vel: Vec2::new(
                rng.random_range(-MAX_COMPONENT_SPEED..=MAX_COMPONENT_SPEED),
                rng.random_range(-MAX_COMPONENT_SPEED..=MAX_COMPONENT_SPEED),
            ),
            radius,
            status: Status::Healthy,
            confined: false,
            infected_days: 0,
        }
    }

    /// Advance position by one step's worth of velocity
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Invert the velocity component whose coordinate would exit
    /// `[radius, dim - radius]` in the direction of travel.
    ///
    /// Only flips when moving toward the violated edge, so repeated calls
    /// without an intervening `advance()` are idempotent.
    pub fn bounce_off_bounds(&mut self, width: f32, height: f32) {
        if (self.pos.x - self.radius < 0.0 && self.vel.x < 0.0)
            || (self.pos.x + self.radius > width && self.vel.x > 0.0)
        {
            self.vel.x = -self.vel.x;
        }
        if (self.pos.y - self.radius < 0.0 && self.vel.y < 0.0)
            || (self.pos.y + self.radius > height && self.vel.y > 0.0)
        {
            self.vel.y = -self.vel.y;
        }
    }

    /// Pairwise collision check and response, then contagion.
    ///
    /// Returns whether the two overlapped. The response: `self` is deflected
    /// away from `other` (velocity decremented by the unit vector toward
    /// `other`), `other`'s velocity is *assigned* that unit vector.
    pub fn collide_with(&mut self, other: &mut Person) -> bool {
        let delta = other.pos - self.pos;
        let diameter = 2.0 * self.radius;
        if delta.length_squared() >= diameter * diameter {
            return false;
        }

        let angle = delta.y.atan2(delta.x);
        let unit = Vec2::new(angle.cos(), angle.sin());
        self.vel -= unit;
        other.vel = unit;

        self.check_contagion(other);
        true
    }

    /// Transfer infection across a contact.
    ///
    /// Both branches are evaluated in order. The first branch mutating
    /// `self.status` before the second branch's condition is read decides
    /// which side converts in mutual-contact edge cases; keep the order.
    pub fn check_contagion(&mut self, other: &mut Person) {
        if other.status == Status::Infected && self.status == Status::Healthy {
            self.infect();
        }
        if self.status == Status::Infected && other.status == Status::Healthy {
            other.infect();
        }
    }

    fn infect(&mut self) {
        self.status = Status::Infected;
        self.infected_days = 0;
    }

    /// One simulated day passes. No-op unless infected.
    ///
    /// The recovery check runs *before* the increment, so a person is
    /// infected for exactly `RECOVERY_DAYS + 1` ticks (days 0..=15) and
    /// recovers on the 16th.
    pub fn tick_day(&mut self) {
        if self.status == Status::Infected {
            if self.infected_days >= RECOVERY_DAYS {
                self.status = Status::Recovered;
            }
            self.infected_days += 1;
        }
    }

    /// Reassign a random in-bounds position (after a surface resize).
    /// Velocity and status are untouched.
    pub fn relocate(&mut self, width: f32, height: f32, rng: &mut impl Rng) {
        self.pos = random_pos(width, height, self.radius, rng);
    }
}

fn random_pos(width: f32, height: f32, radius: f32, rng: &mut impl Rng) -> Vec2 {
    Vec2::new(
        rng.random_range(radius..=(width - radius)),
        rng.random_range(radius..=(height - radius)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn person_at(x: f32, y: f32, dx: f32, dy: f32) -> Person {
        Person {
            pos: Vec2::new(x, y),
            vel: Vec2::new(dx, dy),
            radius: 6.0,
            status: Status::Healthy,
            confined: false,
            infected_days: 0,
        }
    }

    #[test]
    fn test_bounce_top_edge() {
        // 700x400 world, person at (350, 5) heading up with radius 6:
        // y - radius = -1 < 0, so the y component flips
        let mut p = person_at(350.0, 5.0, 0.0, -3.0);
        p.bounce_off_bounds(700.0, 400.0);
        assert_eq!(p.vel, Vec2::new(0.0, 3.0));
    }

    #[test]
    fn test_bounce_idempotent_without_move() {
        let mut p = person_at(350.0, 5.0, 0.0, -3.0);
        p.bounce_off_bounds(700.0, 400.0);
        p.bounce_off_bounds(700.0, 400.0);
        assert_eq!(p.vel, Vec2::new(0.0, 3.0));
    }

    #[test]
    fn test_bounce_ignores_in_bounds() {
        let mut p = person_at(350.0, 200.0, 2.0, -3.0);
        p.bounce_off_bounds(700.0, 400.0);
        assert_eq!(p.vel, Vec2::new(2.0, -3.0));
    }

    #[test]
    fn test_collision_threshold_is_squared_diameter() {
        // Radius 6 -> threshold distance 12 (the diameter, not sum of radii)
        let mut a = person_at(100.0, 100.0, 0.0, 0.0);
        let mut b = person_at(100.0 + 2.0 * 6.0 - 0.01, 100.0, 0.0, 0.0);
        assert!(a.collide_with(&mut b));

        let mut a = person_at(100.0, 100.0, 0.0, 0.0);
        let mut b = person_at(100.0 + 2.0 * 6.0 + 0.01, 100.0, 0.0, 0.0);
        assert!(!a.collide_with(&mut b));
    }

    #[test]
    fn test_collision_response_asymmetric() {
        // Other straight to the right: unit vector is (1, 0)
        let mut a = person_at(100.0, 100.0, 1.0, 1.0);
        let mut b = person_at(105.0, 100.0, 2.0, 2.0);
        assert!(a.collide_with(&mut b));
        assert_eq!(a.vel, Vec2::new(0.0, 1.0)); // decremented
        assert_eq!(b.vel, Vec2::new(1.0, 0.0)); // assigned, history discarded
    }

    #[test]
    fn test_contagion_transfers_on_contact() {
        let mut sick = person_at(100.0, 100.0, 0.0, 0.0);
        sick.status = Status::Infected;
        sick.infected_days = 7;
        let mut well = person_at(104.0, 100.0, 0.0, 0.0);

        sick.collide_with(&mut well);
        assert_eq!(well.status, Status::Infected);
        assert_eq!(well.infected_days, 0);
        // Existing infection untouched
        assert_eq!(sick.status, Status::Infected);
        assert_eq!(sick.infected_days, 7);
    }

    #[test]
    fn test_contagion_branch_order_self_converts_first() {
        // Healthy self vs infected other: branch one fires, and the second
        // branch then sees self as Infected but other is no longer Healthy
        let mut a = person_at(0.0, 0.0, 0.0, 0.0);
        let mut b = person_at(1.0, 0.0, 0.0, 0.0);
        b.status = Status::Infected;
        a.check_contagion(&mut b);
        assert_eq!(a.status, Status::Infected);
        assert_eq!(b.status, Status::Infected);
    }

    #[test]
    fn test_recovered_does_not_reinfect() {
        let mut a = person_at(0.0, 0.0, 0.0, 0.0);
        a.status = Status::Recovered;
        let mut b = person_at(1.0, 0.0, 0.0, 0.0);
        b.status = Status::Infected;
        a.check_contagion(&mut b);
        assert_eq!(a.status, Status::Recovered);
    }

    #[test]
    fn test_recovery_after_exactly_sixteen_day_ticks() {
        let mut p = person_at(0.0, 0.0, 0.0, 0.0);
        p.status = Status::Infected;
        p.infected_days = 0;

        for day in 0..15 {
            p.tick_day();
            assert_eq!(p.status, Status::Infected, "still infected after tick {}", day + 1);
        }
        p.tick_day(); // 16th tick: infected_days reached 15 before the check
        assert_eq!(p.status, Status::Recovered);
    }

    #[test]
    fn test_tick_day_noop_for_healthy_and_recovered() {
        let mut p = person_at(0.0, 0.0, 0.0, 0.0);
        p.tick_day();
        assert_eq!(p.status, Status::Healthy);
        assert_eq!(p.infected_days, 0);

        p.status = Status::Recovered;
        p.infected_days = 16;
        p.tick_day();
        assert_eq!(p.infected_days, 16);
    }

    #[test]
    fn test_relocate_keeps_velocity_and_status() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut p = person_at(350.0, 200.0, 2.0, -1.0);
        p.status = Status::Infected;
        p.relocate(700.0, 400.0, &mut rng);
        assert_eq!(p.vel, Vec2::new(2.0, -1.0));
        assert_eq!(p.status, Status::Infected);
        assert!(p.pos.x >= p.radius && p.pos.x <= 700.0 - p.radius);
        assert!(p.pos.y >= p.radius && p.pos.y <= 400.0 - p.radius);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Position stays in-bounds over any number of advance+bounce
            /// cycles, for any in-bounds start and reasonable velocity.
            #[test]
            fn position_confined_by_bounce(
                x in 6.0f32..694.0,
                y in 6.0f32..394.0,
                dx in -3.0f32..3.0,
                dy in -3.0f32..3.0,
                steps in 1usize..500,
            ) {
                let mut p = person_at(x, y, dx, dy);
                for _ in 0..steps {
                    p.advance();
                    p.bounce_off_bounds(700.0, 400.0);
                }
                // One advance can overshoot before the bounce corrects it,
                // so allow one velocity-magnitude of slack at the edges
                prop_assert!(p.pos.x >= p.radius - 3.0 && p.pos.x <= 700.0 - p.radius + 3.0);
                prop_assert!(p.pos.y >= p.radius - 3.0 && p.pos.y <= 400.0 - p.radius + 3.0);
            }
        }
    }
}
