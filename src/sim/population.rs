//! The population: an ordered collection of people and their aggregate counts
//!
//! Counts are recomputed from a full scan every update pass, never maintained
//! incrementally, so they can't drift from ground truth no matter how many
//! status transitions a pass produced.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::person::{Person, Status};
use crate::consts::PERSON_RADIUS;

/// Aggregate status counts. Invariant: healthy + infected + recovered == total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub healthy: usize,
    pub infected: usize,
    pub recovered: usize,
}

impl Counts {
    pub fn total(&self) -> usize {
        self.healthy + self.infected + self.recovered
    }
}

/// All people in the world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Population {
    people: Vec<Person>,
    counts: Counts,
    /// Set by a surface-resize event; cleared after one relocation pass
    resize_pending: bool,
}

impl Population {
    pub fn empty() -> Self {
        Self {
            people: Vec::new(),
            counts: Counts::default(),
            resize_pending: false,
        }
    }

    /// Seed `total` people at random positions and velocities.
    ///
    /// The first `initial_infected` start Infected; the last `confined_count`
    /// are flagged confined (kept disjoint from the seed infections so the
    /// outbreak can actually move).
    pub fn seed(
        total: usize,
        initial_infected: usize,
        confined_count: usize,
        width: f32,
        height: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let mut people = Vec::with_capacity(total);
        for i in 0..total {
            let mut person = Person::random(width, height, PERSON_RADIUS, rng);
            if i < initial_infected.min(total) {
                person.status = Status::Infected;
            }
            if i >= total.saturating_sub(confined_count) {
                person.confined = true;
            }
            people.push(person);
        }

        let mut population = Self {
            people,
            counts: Counts::default(),
            resize_pending: false,
        };
        population.recount();
        population
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn counts(&self) -> Counts {
        self.counts
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Relocate everyone on the next update pass (surface resized)
    pub fn request_relocate(&mut self) {
        self.resize_pending = true;
    }

    /// One simulation step: pairwise collision/contagion resolution, then
    /// movement and border bounce for the non-confined, then a pending
    /// relocation pass if any, then a full recount.
    ///
    /// Every ordered pair (A, B) with A != B is visited - both orderings -
    /// so the asymmetric response in `Person::collide_with` applies twice
    /// per actual contact per step. Observed behavior, kept.
    pub fn update(&mut self, width: f32, height: f32, rng: &mut impl Rng) {
        let n = self.people.len();
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let (a, b) = pair_mut(&mut self.people, i, j);
                a.collide_with(b);
            }
        }

        for person in &mut self.people {
            if person.confined {
                continue;
            }
            person.advance();
            person.bounce_off_bounds(width, height);
        }

        if self.resize_pending {
            for person in &mut self.people {
                person.relocate(width, height, rng);
            }
            self.resize_pending = false;
        }

        self.recount();
    }

    /// One simulated day passes for everyone
    pub fn tick_day(&mut self) {
        for person in &mut self.people {
            person.tick_day();
        }
        self.recount();
    }

    fn recount(&mut self) {
        let mut counts = Counts::default();
        for person in &self.people {
            match person.status {
                Status::Healthy => counts.healthy += 1,
                Status::Infected => counts.infected += 1,
                Status::Recovered => counts.recovered += 1,
            }
        }
        self.counts = counts;
    }
}

/// Mutable references to two distinct people
fn pair_mut(people: &mut [Person], i: usize, j: usize) -> (&mut Person, &mut Person) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = people.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = people.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
