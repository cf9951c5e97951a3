//! Time-ordered activation queue.
//!
//! Actors are scheduled by the tick they are next due to act. Ordering is
//! lexicographic on `(due_tick, seq)`: `seq` is a strictly increasing
//! counter assigned at push time, so equal-tick entries pop in push order
//! and the pop sequence is reproducible regardless of how actor ids hash.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::state::{EntityId, Tick};

/// Errors that can occur during scheduling operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    /// Popping an empty queue. The activation loop re-pushes every actor
    /// after it acts, so this indicates a broken invariant, not a game
    /// situation.
    #[error("turn queue is empty")]
    Empty,
}

/// One queue entry. Derived `Ord` compares `(due, seq)` first; the pair is
/// unique, so the actor id never participates in ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
struct ScheduledTurn {
    due: Tick,
    seq: u64,
    actor: EntityId,
}

/// Min-priority queue of actor activations keyed by `(due_tick, seq)`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TurnScheduler {
    queue: BinaryHeap<Reverse<ScheduledTurn>>,
    next_seq: u64,
    current_tick: Tick,
}

impl TurnScheduler {
    /// Builds a scheduler with every given actor due at tick 0, in
    /// encounter order.
    pub fn new(actors: impl IntoIterator<Item = EntityId>) -> Self {
        let mut scheduler = Self {
            queue: BinaryHeap::new(),
            next_seq: 0,
            current_tick: Tick::ZERO,
        };
        for actor in actors {
            scheduler.push(actor, 0);
        }
        scheduler
    }

    /// The tick of the most recently popped entry.
    pub fn current_tick(&self) -> Tick {
        self.current_tick
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Schedules an actor `delay` ticks after the current tick.
    pub fn push(&mut self, actor: EntityId, delay: u64) {
        let entry = ScheduledTurn {
            due: self.current_tick + delay,
            seq: self.next_seq,
            actor,
        };
        self.next_seq += 1;
        self.queue.push(Reverse(entry));
    }

    /// Removes and returns the next due actor, advancing the current tick to
    /// its due tick.
    pub fn pop(&mut self) -> Result<EntityId, SchedulerError> {
        let Reverse(entry) = self.queue.pop().ok_or(SchedulerError::Empty)?;
        self.current_tick = entry.due;
        Ok(entry.actor)
    }
}
