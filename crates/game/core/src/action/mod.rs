//! Action resolution.
//!
//! Every action variant resolves through the same two-phase pipeline:
//! `pre_validate` checks all failure conditions against the unmutated state,
//! then `apply` mutates. A failed action therefore never leaves partial
//! mutation behind, and a successful one reports the delay until the actor's
//! next activation.

mod combat;
mod consume;
mod error;
mod inventory;
mod movement;
mod wait;

pub use combat::MeleeAction;
pub use consume::UseItemAction;
pub use error::ActionError;
pub use inventory::{DropAction, PickUpAction, WearAction, WieldAction};
pub use movement::{DescendAction, MoveAction};
pub use wait::WaitAction;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::log::MessageLog;
use crate::rng::DiceRoller;
use crate::state::{EntityId, GameState, InvKey, Position};

/// Mutable collaborators an action may touch besides the game state.
pub struct TurnContext<'a> {
    pub log: &'a mut MessageLog,
    pub rng: &'a mut dyn DiceRoller,
    pub config: &'a GameConfig,
}

/// Side effects of a successful action that the activation loop must act on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActionOutcome {
    #[default]
    None,
    /// The actor took the downstairs; the world-generation collaborator owes
    /// us a new floor.
    Descended,
}

/// A successful resolution: the delay until the actor acts again, plus any
/// outcome the loop must handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub delay: u64,
    pub outcome: ActionOutcome,
}

/// Defines how a concrete action variant mutates game state.
///
/// `pre_validate` must surface every failure condition without mutating;
/// `apply` may assume validation passed and must only fail on broken
/// invariants.
pub trait ActionTransition {
    /// Delay charged on success, read from the pre-mutation state.
    fn delay(&self, state: &GameState) -> u64;

    /// Validates all failure conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState) -> Result<(), ActionError> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly.
    /// Implementations may assume `pre_validate` has already succeeded.
    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut TurnContext<'_>,
    ) -> Result<ActionOutcome, ActionError>;
}

/// Runs a transition through the validate-then-apply pipeline.
fn drive<T: ActionTransition>(
    transition: &T,
    state: &mut GameState,
    ctx: &mut TurnContext<'_>,
) -> Result<Resolution, ActionError> {
    transition.pre_validate(state)?;
    let delay = transition.delay(state);
    let outcome = transition.apply(state, ctx)?;
    Ok(Resolution { delay, outcome })
}

/// One activation's worth of intent for a single actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Wait,
    DescendStairs,
    Move { dx: i32, dy: i32 },
    MeleeAttack { dx: i32, dy: i32 },
    /// Contextual move-or-attack; resolves to whichever of the two applies
    /// at the destination and forwards that variant's result unchanged.
    Bump { dx: i32, dy: i32 },
    PickUp,
    UseItem { key: InvKey, target: Option<Position> },
    Drop { key: InvKey },
    Wield { key: InvKey },
    Wear { key: InvKey },
}

impl Action {
    /// Resolves this action for `actor` against the shared world.
    ///
    /// On `Ok` the state reflects the action and the caller re-queues the
    /// actor after `delay` ticks. On [`ActionError::Impossible`] nothing was
    /// mutated and no time passed.
    pub fn resolve(
        &self,
        actor: EntityId,
        state: &mut GameState,
        ctx: &mut TurnContext<'_>,
    ) -> Result<Resolution, ActionError> {
        match *self {
            Action::Wait => drive(&WaitAction { actor }, state, ctx),
            Action::DescendStairs => drive(&DescendAction { actor }, state, ctx),
            Action::Move { dx, dy } => drive(&MoveAction { actor, dx, dy }, state, ctx),
            Action::MeleeAttack { dx, dy } => drive(&MeleeAction { actor, dx, dy }, state, ctx),
            Action::Bump { dx, dy } => {
                let origin = state
                    .entities
                    .actor(actor)
                    .ok_or(ActionError::MissingActor(actor))?
                    .position;
                if state.entities.actor_at(origin.offset(dx, dy)).is_some() {
                    drive(&MeleeAction { actor, dx, dy }, state, ctx)
                } else {
                    drive(&MoveAction { actor, dx, dy }, state, ctx)
                }
            }
            Action::PickUp => drive(&PickUpAction { actor }, state, ctx),
            Action::UseItem { key, target } => {
                drive(&UseItemAction { actor, key, target }, state, ctx)
            }
            Action::Drop { key } => drive(&DropAction { actor, key }, state, ctx),
            Action::Wield { key } => drive(&WieldAction { actor, key }, state, ctx),
            Action::Wear { key } => drive(&WearAction { actor, key }, state, ctx),
        }
    }
}

/// Capitalizes the first letter of a name for message display.
pub(crate) fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
