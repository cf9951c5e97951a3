use super::{ActionError, ActionOutcome, ActionTransition, TurnContext};
use crate::log::MessageTone;
use crate::state::{EntityId, GameState, Position};

/// Step one tile in a compass direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveAction {
    pub actor: EntityId,
    pub dx: i32,
    pub dy: i32,
}

impl MoveAction {
    fn destination(&self, state: &GameState) -> Result<Position, ActionError> {
        let actor = state
            .entities
            .actor(self.actor)
            .ok_or(ActionError::MissingActor(self.actor))?;
        Ok(actor.position.offset(self.dx, self.dy))
    }
}

impl ActionTransition for MoveAction {
    fn delay(&self, state: &GameState) -> u64 {
        state
            .entities
            .actor(self.actor)
            .map(|actor| actor.fighter.move_delay)
            .unwrap_or(crate::config::GameConfig::BASE_DELAY)
    }

    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        let destination = self.destination(state)?;
        if !state.grid.in_bounds(destination) {
            return Err(ActionError::impossible(
                "That way lies the edge of the world.",
            ));
        }
        if !state.grid.is_walkable(destination) {
            return Err(ActionError::impossible("That way is blocked by a wall."));
        }
        if state.entities.blocking_entity_at(destination).is_some() {
            return Err(ActionError::impossible("Something is in the way."));
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        _ctx: &mut TurnContext<'_>,
    ) -> Result<ActionOutcome, ActionError> {
        let destination = self.destination(state)?;
        let actor = state
            .entities
            .actor_mut(self.actor)
            .ok_or(ActionError::MissingActor(self.actor))?;
        actor.position = destination;
        Ok(ActionOutcome::None)
    }
}

/// Take the staircase down. Valid only on the downstairs tile; the actual
/// floor regeneration is owed by the world-generation collaborator, which
/// reacts to the [`ActionOutcome::Descended`] outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DescendAction {
    pub actor: EntityId,
}

impl ActionTransition for DescendAction {
    fn delay(&self, state: &GameState) -> u64 {
        state
            .entities
            .actor(self.actor)
            .map(|actor| actor.fighter.move_delay)
            .unwrap_or(crate::config::GameConfig::BASE_DELAY)
    }

    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        let actor = state
            .entities
            .actor(self.actor)
            .ok_or(ActionError::MissingActor(self.actor))?;
        if actor.position != state.grid.downstairs() {
            return Err(ActionError::impossible("There are no stairs here."));
        }
        Ok(())
    }

    fn apply(
        &self,
        _state: &mut GameState,
        ctx: &mut TurnContext<'_>,
    ) -> Result<ActionOutcome, ActionError> {
        ctx.log
            .add("You descend the staircase.", MessageTone::Info);
        Ok(ActionOutcome::Descended)
    }
}
