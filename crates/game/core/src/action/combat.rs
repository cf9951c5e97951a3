use super::{ActionError, ActionOutcome, ActionTransition, TurnContext, capitalize};
use crate::combat;
use crate::log::MessageTone;
use crate::state::{EntityId, GameState, Position};

/// Swing at the actor one tile away in a compass direction.
///
/// Never fails once a living target stands at the destination; a bad roll
/// reports a harmless hit instead. The delay is charged either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeleeAction {
    pub actor: EntityId,
    pub dx: i32,
    pub dy: i32,
}

impl MeleeAction {
    fn destination(&self, state: &GameState) -> Result<Position, ActionError> {
        let actor = state
            .entities
            .actor(self.actor)
            .ok_or(ActionError::MissingActor(self.actor))?;
        Ok(actor.position.offset(self.dx, self.dy))
    }
}

impl ActionTransition for MeleeAction {
    fn delay(&self, state: &GameState) -> u64 {
        state
            .entities
            .actor(self.actor)
            .map(|actor| actor.fighter.melee_delay)
            .unwrap_or(crate::config::GameConfig::BASE_DELAY)
    }

    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        let destination = self.destination(state)?;
        if state.entities.actor_at(destination).is_none() {
            return Err(ActionError::impossible("Nothing to attack."));
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut TurnContext<'_>,
    ) -> Result<ActionOutcome, ActionError> {
        let destination = self.destination(state)?;
        let attacker = state
            .entities
            .actor(self.actor)
            .ok_or(ActionError::MissingActor(self.actor))?;
        let attacker_name = capitalize(&attacker.name);
        let tone = if attacker.is_player() {
            MessageTone::PlayerAttack
        } else {
            MessageTone::EnemyAttack
        };

        let target_id = state
            .entities
            .actor_at(destination)
            .map(|target| target.id)
            .ok_or(ActionError::impossible("Nothing to attack."))?;
        let target_name = state
            .entities
            .actor(target_id)
            .map(|target| target.name.clone())
            .ok_or(ActionError::MissingActor(target_id))?;

        let attack = state.entities.melee_damage(self.actor).max(1);
        let guard = state.entities.defense(target_id).max(0);
        let damage = ctx.rng.roll_range(1, attack) - ctx.rng.roll_range(0, guard);

        let attack_desc = format!("{attacker_name} attacks {target_name}");
        if damage > 0 {
            ctx.log
                .add(format!("{attack_desc} for {damage} hit points."), tone);
            let target = state
                .entities
                .actor_mut(target_id)
                .ok_or(ActionError::MissingActor(target_id))?;
            combat::take_damage(target, damage, ctx.log);
        } else {
            ctx.log
                .add(format!("{attack_desc} but does no damage."), tone);
        }

        Ok(ActionOutcome::None)
    }
}
