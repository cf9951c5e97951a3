//! Injected randomness.
//!
//! Combat rolls and confusion stumbling draw from a [`DiceRoller`] passed in
//! by the caller rather than ambient global randomness, so two sessions
//! seeded identically replay identically and tests can script exact
//! outcomes.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seedable random source consumed by the resolver and AI.
pub trait DiceRoller {
    /// Uniform integer in `[min, max]` inclusive. `min >= max` returns `min`.
    fn roll_range(&mut self, min: i32, max: i32) -> i32;

    /// Uniform index into a collection of `len` elements.
    fn choose_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.roll_range(0, len as i32 - 1) as usize
    }
}

/// Default roller backed by a small, fast, seedable PRNG.
#[derive(Clone, Debug)]
pub struct GameRng(SmallRng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl DiceRoller for GameRng {
    fn roll_range(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.0.gen_range(min..=max)
    }
}

/// Scripted roller that replays a fixed sequence of values, clamped into the
/// requested range. Repeats its last value when exhausted. Intended for
/// tests and demos that need pinned outcomes.
#[derive(Clone, Debug)]
pub struct FixedRolls {
    values: Vec<i32>,
    cursor: usize,
}

impl FixedRolls {
    pub fn new(values: impl Into<Vec<i32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }
}

impl DiceRoller for FixedRolls {
    fn roll_range(&mut self, min: i32, max: i32) -> i32 {
        let value = self
            .values
            .get(self.cursor)
            .or_else(|| self.values.last())
            .copied()
            .unwrap_or(min);
        if self.cursor < self.values.len() {
            self.cursor += 1;
        }
        value.clamp(min, max.max(min))
    }
}
