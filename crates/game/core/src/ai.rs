//! Per-actor behavior strategies.
//!
//! Behaviors form a closed sum type matched exhaustively by the activation
//! loop: a stable hostile-pursuit strategy, and a transient confusion
//! wrapper that holds the strategy it replaced and restores it exactly when
//! it expires.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::action::{Action, TurnContext};
use crate::log::MessageTone;
use crate::path;
use crate::state::{EntityId, GameState, Position};

/// The eight compass step directions.
pub const COMPASS_DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// What an activation produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AiDecision {
    /// Resolve this action; its failure is tolerated as a lost turn.
    Act(Action),
    /// Replace the actor's behavior with the wrapped strategy and re-queue
    /// immediately (delay 0); no action happens this activation.
    Restore(Box<AiState>),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    /// Chase the player and attack when adjacent, keeping the last computed
    /// path as a fallback while out of sight.
    Hostile { path: VecDeque<Position> },
    /// Stumble in random directions for a while, then hand control back to
    /// the wrapped strategy.
    Confused {
        previous: Box<AiState>,
        turns_remaining: u32,
    },
}

impl AiState {
    pub fn hostile() -> Self {
        Self::Hostile {
            path: VecDeque::new(),
        }
    }

    pub fn confused(previous: AiState, turns: u32) -> Self {
        Self::Confused {
            previous: Box::new(previous),
            turns_remaining: turns,
        }
    }

    /// Produces one decision for this activation. Never errors: with no
    /// target or path available the actor simply waits.
    pub fn decide(
        &mut self,
        actor: EntityId,
        state: &GameState,
        ctx: &mut TurnContext<'_>,
    ) -> AiDecision {
        match self {
            AiState::Hostile { path } => {
                let Some(me) = state.entities.actor(actor) else {
                    return AiDecision::Act(Action::Wait);
                };
                let target = state.entities.player();
                let distance = me.position.chebyshev(target.position);

                // Visibility is symmetric on this grid: if this tile is in
                // the player's view, the player is in this actor's.
                if state.grid.is_visible(me.position) {
                    if distance <= 1 {
                        return AiDecision::Act(Action::MeleeAttack {
                            dx: target.position.x - me.position.x,
                            dy: target.position.y - me.position.y,
                        });
                    }
                    *path =
                        path::find_path(state, ctx.config, me.position, target.position, actor);
                }

                if let Some(next) = path.pop_front() {
                    return AiDecision::Act(Action::Move {
                        dx: next.x - me.position.x,
                        dy: next.y - me.position.y,
                    });
                }
                AiDecision::Act(Action::Wait)
            }
            AiState::Confused {
                previous,
                turns_remaining,
            } => {
                if *turns_remaining == 0 {
                    if let Some(me) = state.entities.actor(actor) {
                        ctx.log.add(
                            format!("The {} is no longer confused.", me.name),
                            MessageTone::StatusEffect,
                        );
                    }
                    return AiDecision::Restore(previous.clone());
                }
                *turns_remaining -= 1;
                let (dx, dy) =
                    COMPASS_DIRECTIONS[ctx.rng.choose_index(COMPASS_DIRECTIONS.len())];
                AiDecision::Act(Action::Bump { dx, dy })
            }
        }
    }
}
