use super::{ActionError, ActionOutcome, ActionTransition, TurnContext};
use crate::config::GameConfig;
use crate::state::{EntityId, GameState};

/// Do nothing for one base tick cost. Always succeeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitAction {
    pub actor: EntityId,
}

impl ActionTransition for WaitAction {
    fn delay(&self, _state: &GameState) -> u64 {
        GameConfig::BASE_DELAY
    }

    fn apply(
        &self,
        _state: &mut GameState,
        _ctx: &mut TurnContext<'_>,
    ) -> Result<ActionOutcome, ActionError> {
        Ok(ActionOutcome::None)
    }
}
