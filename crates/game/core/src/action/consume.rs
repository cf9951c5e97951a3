use super::{ActionError, ActionOutcome, ActionTransition, TurnContext};
use crate::combat;
use crate::config::GameConfig;
use crate::log::MessageTone;
use crate::ai::AiState;
use crate::state::{ConsumableKind, EntityId, GameState, InvKey, Position};

/// Activate one unit of a consumable stack against an action context.
///
/// The effect resolves first; exactly one unit is consumed only after it
/// succeeds, so a wasted scroll can never result from an impossible target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UseItemAction {
    pub actor: EntityId,
    pub key: InvKey,
    pub target: Option<Position>,
}

impl UseItemAction {
    fn consumable(&self, state: &GameState) -> Result<(ConsumableKind, String), ActionError> {
        let actor = state
            .entities
            .actor(self.actor)
            .ok_or(ActionError::MissingActor(self.actor))?;
        let item_id = actor
            .inventory
            .first(self.key)
            .ok_or_else(|| ActionError::impossible("You don't have that item."))?;
        let item = state
            .entities
            .item(item_id)
            .ok_or(ActionError::MissingItem(item_id))?;
        match item.kind.consumable() {
            Some(kind) => Ok((kind, item.name.clone())),
            None => Err(ActionError::impossible(format!(
                "You can't use the {}.",
                item.name
            ))),
        }
    }

    /// Nearest visible living actor within `range` of the user, preferring
    /// the closest and breaking ties by id for determinism.
    fn lightning_target(&self, state: &GameState, range: i32) -> Option<EntityId> {
        let origin = state.entities.actor(self.actor)?.position;
        state
            .entities
            .all_actors()
            .filter(|candidate| {
                candidate.id != self.actor
                    && candidate.is_alive()
                    && state.grid.is_visible(candidate.position)
                    && origin.chebyshev(candidate.position) <= range
            })
            .min_by_key(|candidate| (origin.chebyshev(candidate.position), candidate.id))
            .map(|candidate| candidate.id)
    }

    fn fireball_targets(&self, state: &GameState, center: Position, radius: i32) -> Vec<EntityId> {
        state
            .entities
            .all_actors()
            .filter(|candidate| {
                candidate.is_alive() && candidate.position.chebyshev(center) <= radius
            })
            .map(|candidate| candidate.id)
            .collect()
    }

    fn validate_effect(&self, state: &GameState, kind: ConsumableKind) -> Result<(), ActionError> {
        match kind {
            ConsumableKind::Healing { .. } => {
                let actor = state
                    .entities
                    .actor(self.actor)
                    .ok_or(ActionError::MissingActor(self.actor))?;
                if actor.fighter.hp() >= actor.fighter.max_hp() {
                    return Err(ActionError::impossible("Your health is already full."));
                }
            }
            ConsumableKind::Lightning { range, .. } => {
                if self.lightning_target(state, range).is_none() {
                    return Err(ActionError::impossible("No enemy is close enough to strike."));
                }
            }
            ConsumableKind::Confusion { .. } => {
                let target = self
                    .target
                    .ok_or_else(|| ActionError::impossible("You must select an enemy to target."))?;
                if !state.grid.is_visible(target) {
                    return Err(ActionError::impossible(
                        "You cannot target an area that you cannot see.",
                    ));
                }
                let victim = state
                    .entities
                    .actor_at(target)
                    .ok_or_else(|| ActionError::impossible("You must select an enemy to target."))?;
                if victim.id == self.actor {
                    return Err(ActionError::impossible("You cannot confuse yourself!"));
                }
            }
            ConsumableKind::Fireball { radius, .. } => {
                let center = self
                    .target
                    .ok_or_else(|| ActionError::impossible("You must select an area to target."))?;
                if !state.grid.is_visible(center) {
                    return Err(ActionError::impossible(
                        "You cannot target an area that you cannot see.",
                    ));
                }
                if self.fireball_targets(state, center, radius).is_empty() {
                    return Err(ActionError::impossible("There are no targets in the radius."));
                }
            }
        }
        Ok(())
    }

    fn apply_effect(
        &self,
        state: &mut GameState,
        ctx: &mut TurnContext<'_>,
        kind: ConsumableKind,
        item_name: &str,
    ) -> Result<(), ActionError> {
        match kind {
            ConsumableKind::Healing { amount } => {
                let actor = state
                    .entities
                    .actor_mut(self.actor)
                    .ok_or(ActionError::MissingActor(self.actor))?;
                let recovered = combat::heal(actor, amount);
                ctx.log.add(
                    format!("You consume the {item_name}, and recover {recovered} HP!"),
                    MessageTone::ItemUse,
                );
            }
            ConsumableKind::Lightning { damage, range } => {
                let target_id = self
                    .lightning_target(state, range)
                    .ok_or_else(|| ActionError::impossible("No enemy is close enough to strike."))?;
                let target = state
                    .entities
                    .actor_mut(target_id)
                    .ok_or(ActionError::MissingActor(target_id))?;
                ctx.log.add(
                    format!(
                        "A lightning bolt strikes the {} with a loud thunder, for {damage} damage!",
                        target.name
                    ),
                    MessageTone::ItemUse,
                );
                combat::take_damage(target, damage, ctx.log);
            }
            ConsumableKind::Confusion { turns } => {
                let target = self
                    .target
                    .ok_or_else(|| ActionError::impossible("You must select an enemy to target."))?;
                let victim_id = state
                    .entities
                    .actor_at(target)
                    .map(|victim| victim.id)
                    .ok_or_else(|| ActionError::impossible("You must select an enemy to target."))?;
                let victim = state
                    .entities
                    .actor_mut(victim_id)
                    .ok_or(ActionError::MissingActor(victim_id))?;
                let previous = victim
                    .behavior
                    .take()
                    .ok_or(ActionError::MissingActor(victim_id))?;
                victim.behavior = Some(AiState::confused(previous, turns));
                ctx.log.add(
                    format!(
                        "The eyes of the {} look vacant, as it starts to stumble around!",
                        victim.name
                    ),
                    MessageTone::StatusEffect,
                );
            }
            ConsumableKind::Fireball { damage, radius } => {
                let center = self
                    .target
                    .ok_or_else(|| ActionError::impossible("You must select an area to target."))?;
                for target_id in self.fireball_targets(state, center, radius) {
                    let target = state
                        .entities
                        .actor_mut(target_id)
                        .ok_or(ActionError::MissingActor(target_id))?;
                    ctx.log.add(
                        format!(
                            "The {} is engulfed in a fiery explosion, taking {damage} damage!",
                            target.name
                        ),
                        MessageTone::ItemUse,
                    );
                    combat::take_damage(target, damage, ctx.log);
                }
            }
        }
        Ok(())
    }
}

impl ActionTransition for UseItemAction {
    fn delay(&self, _state: &GameState) -> u64 {
        GameConfig::BASE_DELAY
    }

    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        let (kind, _) = self.consumable(state)?;
        self.validate_effect(state, kind)
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut TurnContext<'_>,
    ) -> Result<ActionOutcome, ActionError> {
        let (kind, name) = self.consumable(state)?;
        self.apply_effect(state, ctx, kind, &name)?;

        let actor = state
            .entities
            .actor_mut(self.actor)
            .ok_or(ActionError::MissingActor(self.actor))?;
        let consumed = actor
            .inventory
            .take_one(self.key)
            .ok_or(ActionError::MissingKey(self.key))?;
        state
            .entities
            .remove_item(consumed)
            .ok_or(ActionError::MissingItem(consumed))?;
        Ok(ActionOutcome::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::log::MessageLog;
    use crate::rng::GameRng;
    use crate::state::{
        ActorEntity, EntitiesState, Fighter, Inventory, ItemEntity, ItemKind, Rgb, TileGrid,
    };

    fn lit_state() -> GameState {
        let mut grid = TileGrid::new(10, 10);
        for y in 0..10 {
            for x in 0..10 {
                let p = Position::new(x, y);
                grid.set_terrain(p, true, true);
                grid.set_visible(p, true);
            }
        }
        let player = ActorEntity::new(
            EntityId::PLAYER,
            "Player",
            '@',
            Rgb(255, 255, 255),
            Position::new(5, 5),
            Fighter::new(30, 0, 1),
            Inventory::new(26),
        );
        GameState::new(grid, EntitiesState::new(player))
    }

    fn give_consumable(state: &mut GameState, name: &str, kind: ConsumableKind) -> InvKey {
        let id = state.entities.allocate_id();
        state
            .entities
            .insert_item(ItemEntity::new(id, name, '!', Rgb(127, 0, 255), ItemKind::Consumable(kind)));
        state
            .entities
            .player_mut()
            .inventory
            .insert_new_stack(id)
            .unwrap()
    }

    fn spawn_orc(state: &mut GameState, position: Position) -> EntityId {
        let id = state.entities.allocate_id();
        state.entities.insert_actor(ActorEntity::new(
            id,
            "Orc",
            'o',
            Rgb(63, 127, 63),
            position,
            Fighter::new(10, 0, 3),
            Inventory::new(0),
        ));
        id
    }

    fn resolve(state: &mut GameState, action: Action) -> Result<(), ActionError> {
        let mut log = MessageLog::new();
        let mut rng = GameRng::seeded(1);
        let config = GameConfig::default();
        let mut ctx = TurnContext {
            log: &mut log,
            rng: &mut rng,
            config: &config,
        };
        action.resolve(EntityId::PLAYER, state, &mut ctx).map(|_| ())
    }

    #[test]
    fn drinking_at_full_health_fails_and_keeps_the_potion() {
        let mut state = lit_state();
        let key = give_consumable(&mut state, "Health Potion", ConsumableKind::Healing { amount: 4 });

        let result = resolve(&mut state, Action::UseItem { key, target: None });
        assert_eq!(
            result,
            Err(ActionError::impossible("Your health is already full."))
        );
        assert!(state.entities.player().inventory.stack(key).is_some());
    }

    #[test]
    fn healing_consumes_exactly_one_unit() {
        let mut state = lit_state();
        let key = give_consumable(&mut state, "Health Potion", ConsumableKind::Healing { amount: 4 });
        let second = state.entities.allocate_id();
        state.entities.insert_item(ItemEntity::new(
            second,
            "Health Potion",
            '!',
            Rgb(127, 0, 255),
            ItemKind::Consumable(ConsumableKind::Healing { amount: 4 }),
        ));
        state.entities.player_mut().inventory.push_onto(key, second);

        let player = state.entities.player_mut();
        player.fighter.set_hp(20);

        resolve(&mut state, Action::UseItem { key, target: None }).unwrap();
        assert_eq!(state.entities.player().fighter.hp(), 24);
        assert_eq!(state.entities.player().inventory.stack(key).unwrap().len(), 1);
        // The consumed unit is gone from the arena too.
        assert!(state.entities.item(second).is_none());
    }

    #[test]
    fn lightning_strikes_the_nearest_visible_enemy() {
        let mut state = lit_state();
        let key = give_consumable(
            &mut state,
            "Lightning Scroll",
            ConsumableKind::Lightning { damage: 20, range: 5 },
        );
        let near = spawn_orc(&mut state, Position::new(6, 5));
        spawn_orc(&mut state, Position::new(9, 5));

        resolve(&mut state, Action::UseItem { key, target: None }).unwrap();
        let orc = state.entities.actor(near).unwrap();
        assert_eq!(orc.fighter.hp(), 0);
        assert!(!orc.is_alive());
    }

    #[test]
    fn lightning_with_no_enemy_in_range_fails() {
        let mut state = lit_state();
        let key = give_consumable(
            &mut state,
            "Lightning Scroll",
            ConsumableKind::Lightning { damage: 20, range: 2 },
        );
        spawn_orc(&mut state, Position::new(9, 9));

        let result = resolve(&mut state, Action::UseItem { key, target: None });
        assert_eq!(
            result,
            Err(ActionError::impossible("No enemy is close enough to strike."))
        );
    }

    #[test]
    fn confusion_wraps_the_target_behavior() {
        let mut state = lit_state();
        let key = give_consumable(&mut state, "Confusion Scroll", ConsumableKind::Confusion { turns: 10 });
        let orc = spawn_orc(&mut state, Position::new(6, 5));

        resolve(
            &mut state,
            Action::UseItem {
                key,
                target: Some(Position::new(6, 5)),
            },
        )
        .unwrap();

        match &state.entities.actor(orc).unwrap().behavior {
            Some(AiState::Confused { turns_remaining, .. }) => assert_eq!(*turns_remaining, 10),
            other => panic!("expected confusion, got {other:?}"),
        }
    }

    #[test]
    fn confusing_yourself_is_impossible() {
        let mut state = lit_state();
        let key = give_consumable(&mut state, "Confusion Scroll", ConsumableKind::Confusion { turns: 10 });
        spawn_orc(&mut state, Position::new(6, 5));

        let result = resolve(
            &mut state,
            Action::UseItem {
                key,
                target: Some(Position::new(5, 5)),
            },
        );
        assert_eq!(result, Err(ActionError::impossible("You cannot confuse yourself!")));
    }

    #[test]
    fn fireball_hits_everyone_in_the_blast() {
        let mut state = lit_state();
        let key = give_consumable(
            &mut state,
            "Fireball Scroll",
            ConsumableKind::Fireball { damage: 12, radius: 2 },
        );
        let close = spawn_orc(&mut state, Position::new(7, 5));
        let caught = spawn_orc(&mut state, Position::new(8, 6));
        let safe = spawn_orc(&mut state, Position::new(1, 1));

        resolve(
            &mut state,
            Action::UseItem {
                key,
                target: Some(Position::new(7, 5)),
            },
        )
        .unwrap();

        assert!(!state.entities.actor(close).unwrap().is_alive());
        assert!(!state.entities.actor(caught).unwrap().is_alive());
        assert!(state.entities.actor(safe).unwrap().is_alive());
    }

    #[test]
    fn fireball_on_an_unseen_tile_fails() {
        let mut state = lit_state();
        state.grid.set_visible(Position::new(9, 9), false);
        let key = give_consumable(
            &mut state,
            "Fireball Scroll",
            ConsumableKind::Fireball { damage: 12, radius: 2 },
        );
        spawn_orc(&mut state, Position::new(9, 8));

        let result = resolve(
            &mut state,
            Action::UseItem {
                key,
                target: Some(Position::new(9, 9)),
            },
        );
        assert_eq!(
            result,
            Err(ActionError::impossible(
                "You cannot target an area that you cannot see."
            ))
        );
    }
}
