//! Exercise rotation generator.
//!
//! Assigns one exercise to each work interval of a session, drawn at
//! random from a fixed pool with the single invariant that no two
//! consecutive intervals share an exercise. The assignment is memoized
//! per session; `reset()` forces a fresh draw for the next session.

use rand::prelude::*;
use rand_pcg::Pcg64;

use crate::config::SessionConfig;
use crate::timer::Phase;

/// Default exercise pool.
pub const DEFAULT_POOL: [&str; 10] = [
    "Push-ups",
    "Squats",
    "Burpees",
    "Lunges",
    "Mountain Climbers",
    "Plank",
    "Jumping Jacks",
    "High Knees",
    "Bicycle Crunches",
    "Jump Squats",
];

/// Per-session exercise assignment with an explicit lifecycle.
///
/// Owned and passed by reference instead of living in module-level
/// mutable state; callers `reset()` at the start of each new session so
/// every session gets an independent random sequence.
#[derive(Debug, Clone)]
pub struct ExerciseRotation {
    pool: Vec<String>,
    assigned: Option<Vec<String>>,
}

impl ExerciseRotation {
    /// A pool of size 1 cannot satisfy the no-repeat invariant for more
    /// than one interval; that is a configuration precondition, not a
    /// runtime error.
    pub fn new<I, S>(pool: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pool: Vec<String> = pool.into_iter().map(Into::into).collect();
        assert!(!pool.is_empty(), "exercise pool must not be empty");
        Self {
            pool,
            assigned: None,
        }
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    /// The memoized assignment, if one has been generated this session.
    pub fn assigned(&self) -> Option<&[String]> {
        self.assigned.as_deref()
    }

    /// Lazily build and memoize the assignment for the active
    /// configuration. Repeated calls return the same sequence until
    /// `reset()`.
    pub fn get_or_create(&mut self, config: &SessionConfig) -> &[String] {
        self.get_or_create_with(config, &mut rand::thread_rng())
    }

    /// Seeded variant for reproducible assignments.
    pub fn get_or_create_seeded(&mut self, config: &SessionConfig, seed: u64) -> &[String] {
        self.get_or_create_with(config, &mut Pcg64::seed_from_u64(seed))
    }

    pub fn get_or_create_with<R: Rng>(&mut self, config: &SessionConfig, rng: &mut R) -> &[String] {
        if self.assigned.is_none() {
            self.assigned = Some(generate(&self.pool, config.total_intervals as usize, rng));
        }
        self.assigned.as_deref().unwrap_or_default()
    }

    /// Clear the memo so the next `get_or_create` draws a new sequence.
    pub fn reset(&mut self) {
        self.assigned = None;
    }
}

impl Default for ExerciseRotation {
    fn default() -> Self {
        Self::new(DEFAULT_POOL)
    }
}

/// Draw `count` labels, each uniformly from `pool` minus the immediately
/// preceding pick. Guarantees no consecutive duplicates by construction.
fn generate<R: Rng>(pool: &[String], count: usize, rng: &mut R) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(count);
    for _ in 0..count {
        let previous = out.last().map(String::as_str);
        let candidates: Vec<&String> = pool
            .iter()
            .filter(|e| Some(e.as_str()) != previous)
            .collect();
        let pick = match candidates.choose(rng) {
            Some(pick) => (*pick).clone(),
            // Only reachable with a single-element pool.
            None => pool[0].clone(),
        };
        out.push(pick);
    }
    out
}

/// Index into the assignment for the exercise to display: the prepare
/// phase previews the first interval, a work phase shows its own
/// interval, and a rest phase previews the upcoming one.
pub fn exercise_slot(phase: Phase, current_interval: u32) -> usize {
    match phase {
        Phase::Prepare => 0,
        Phase::Work => current_interval.saturating_sub(1) as usize,
        Phase::Rest => current_interval as usize,
    }
}
