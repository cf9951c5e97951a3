use super::{ActionError, ActionOutcome, ActionTransition, TurnContext};
use crate::config::GameConfig;
use crate::log::MessageTone;
use crate::state::{EntityId, GameState, InvKey, Inventory};

/// Finds the key of an existing stack holding items named `name`, if any.
/// Stacks hold identically-named items, so only the first id is consulted.
fn matching_stack(state: &GameState, inventory: &Inventory, name: &str) -> Option<InvKey> {
    inventory.iter().find_map(|(key, stack)| {
        let first = *stack.first()?;
        (state.entities.item(first)?.name == name).then_some(key)
    })
}

/// Lift the first item lying on the actor's own tile into the inventory,
/// stacking onto a same-named stack or taking a fresh key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickUpAction {
    pub actor: EntityId,
}

impl ActionTransition for PickUpAction {
    fn delay(&self, _state: &GameState) -> u64 {
        GameConfig::BASE_DELAY
    }

    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        let actor = state
            .entities
            .actor(self.actor)
            .ok_or(ActionError::MissingActor(self.actor))?;
        let Some(item) = state.entities.items_at(actor.position).next() else {
            return Err(ActionError::impossible("There is nothing here to pick up."));
        };
        if matching_stack(state, &actor.inventory, &item.name).is_none()
            && !actor.inventory.can_accept_new_stack()
        {
            return Err(ActionError::impossible("Inventory is full."));
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut TurnContext<'_>,
    ) -> Result<ActionOutcome, ActionError> {
        let actor = state
            .entities
            .actor(self.actor)
            .ok_or(ActionError::MissingActor(self.actor))?;
        let position = actor.position;
        let (item_id, name) = state
            .entities
            .items_at(position)
            .next()
            .map(|item| (item.id, item.name.clone()))
            .ok_or_else(|| ActionError::impossible("There is nothing here to pick up."))?;
        let stack_key = matching_stack(state, &actor.inventory, &name);

        let inventory = &mut state
            .entities
            .actor_mut(self.actor)
            .ok_or(ActionError::MissingActor(self.actor))?
            .inventory;
        match stack_key {
            Some(key) => {
                inventory.push_onto(key, item_id);
            }
            None => {
                inventory
                    .insert_new_stack(item_id)
                    .ok_or_else(|| ActionError::impossible("Inventory is full."))?;
            }
        }

        state
            .entities
            .item_mut(item_id)
            .ok_or(ActionError::MissingItem(item_id))?
            .position = None;
        ctx.log
            .add(format!("You picked up the {name}!"), MessageTone::ItemUse);
        Ok(ActionOutcome::None)
    }
}

/// Place an entire stack on the actor's current tile, clearing any wielded
/// or worn reference to its key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropAction {
    pub actor: EntityId,
    pub key: InvKey,
}

impl ActionTransition for DropAction {
    fn delay(&self, _state: &GameState) -> u64 {
        GameConfig::BASE_DELAY
    }

    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
        let actor = state
            .entities
            .actor(self.actor)
            .ok_or(ActionError::MissingActor(self.actor))?;
        if actor.inventory.stack(self.key).is_none() {
            return Err(ActionError::impossible("You don't have that item."));
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut TurnContext<'_>,
    ) -> Result<ActionOutcome, ActionError> {
        let actor = state
            .entities
            .actor_mut(self.actor)
            .ok_or(ActionError::MissingActor(self.actor))?;
        let position = actor.position;
        let stack = actor
            .inventory
            .remove_stack(self.key)
            .ok_or(ActionError::MissingKey(self.key))?;

        let mut name = String::new();
        for item_id in &stack {
            let item = state
                .entities
                .item_mut(*item_id)
                .ok_or(ActionError::MissingItem(*item_id))?;
            item.position = Some(position);
            name = item.name.clone();
        }

        let text = if stack.len() > 1 {
            format!("You dropped {} {name}s.", stack.len())
        } else {
            format!("You dropped the {name}.")
        };
        ctx.log.add(text, MessageTone::ItemUse);
        Ok(ActionOutcome::None)
    }
}

/// Point the single wield slot at a carried melee weapon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WieldAction {
    pub actor: EntityId,
    pub key: InvKey,
}

impl ActionTransition for WieldAction {
    fn delay(&self, _state: &GameState) -> u64 {
        GameConfig::BASE_DELAY
    }

    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
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
        if item.kind.weapon_damage().is_none() {
            return Err(ActionError::impossible("You can't wield that."));
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut TurnContext<'_>,
    ) -> Result<ActionOutcome, ActionError> {
        let actor = state
            .entities
            .actor_mut(self.actor)
            .ok_or(ActionError::MissingActor(self.actor))?;
        let item_id = actor
            .inventory
            .first(self.key)
            .ok_or(ActionError::MissingKey(self.key))?;
        actor.inventory.wield(self.key);
        let name = state
            .entities
            .item(item_id)
            .ok_or(ActionError::MissingItem(item_id))?
            .name
            .clone();
        ctx.log
            .add(format!("You are now wielding the {name}."), MessageTone::ItemUse);
        Ok(ActionOutcome::None)
    }
}

/// Point a body slot at a carried piece of armor. Wearing into an occupied
/// slot moves the reference only; the displaced item stays in the inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WearAction {
    pub actor: EntityId,
    pub key: InvKey,
}

impl ActionTransition for WearAction {
    fn delay(&self, _state: &GameState) -> u64 {
        GameConfig::BASE_DELAY
    }

    fn pre_validate(&self, state: &GameState) -> Result<(), ActionError> {
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
        if item.kind.armor().is_none() {
            return Err(ActionError::impossible("You can't wear that."));
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut TurnContext<'_>,
    ) -> Result<ActionOutcome, ActionError> {
        let actor = state
            .entities
            .actor(self.actor)
            .ok_or(ActionError::MissingActor(self.actor))?;
        let item_id = actor
            .inventory
            .first(self.key)
            .ok_or(ActionError::MissingKey(self.key))?;
        let item = state
            .entities
            .item(item_id)
            .ok_or(ActionError::MissingItem(item_id))?;
        let (_, slot) = item.kind.armor().ok_or(ActionError::MissingItem(item_id))?;
        let name = item.name.clone();

        let actor = state
            .entities
            .actor_mut(self.actor)
            .ok_or(ActionError::MissingActor(self.actor))?;
        actor.inventory.wear(slot, self.key);
        ctx.log
            .add(format!("You are now wearing the {name}."), MessageTone::ItemUse);
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
        ActorEntity, ArmorSlot, EntitiesState, Fighter, ItemEntity, ItemKind, Position, Rgb,
        TileGrid,
    };

    fn state_with_capacity(capacity: usize) -> GameState {
        let mut grid = TileGrid::new(8, 8);
        for y in 0..8 {
            for x in 0..8 {
                grid.set_terrain(Position::new(x, y), true, true);
            }
        }
        let player = ActorEntity::new(
            EntityId::PLAYER,
            "Player",
            '@',
            Rgb(255, 255, 255),
            Position::new(2, 2),
            Fighter::new(30, 0, 1),
            Inventory::new(capacity),
        );
        GameState::new(grid, EntitiesState::new(player))
    }

    fn ground_item(state: &mut GameState, name: &str, kind: ItemKind, position: Position) -> EntityId {
        let id = state.entities.allocate_id();
        let mut item = ItemEntity::new(id, name, '?', Rgb(255, 255, 255), kind);
        item.position = Some(position);
        state.entities.insert_item(item);
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
    fn pickup_with_nothing_underfoot_is_impossible() {
        let mut state = state_with_capacity(26);
        let result = resolve(&mut state, Action::PickUp);
        assert_eq!(
            result,
            Err(ActionError::impossible("There is nothing here to pick up."))
        );
    }

    #[test]
    fn pickup_stacks_same_named_items_past_capacity() {
        let mut state = state_with_capacity(1);
        let here = Position::new(2, 2);
        let potion = ItemKind::Consumable(crate::state::ConsumableKind::Healing { amount: 4 });
        ground_item(&mut state, "Health Potion", potion, here);
        ground_item(&mut state, "Health Potion", potion, here);
        ground_item(&mut state, "Lightning Scroll", potion, here);

        resolve(&mut state, Action::PickUp).unwrap();
        resolve(&mut state, Action::PickUp).unwrap();
        let key = InvKey('a');
        assert_eq!(state.entities.player().inventory.stack(key).unwrap().len(), 2);

        // A distinct name needs a fresh key, and the capacity is spent.
        let result = resolve(&mut state, Action::PickUp);
        assert_eq!(result, Err(ActionError::impossible("Inventory is full.")));
    }

    #[test]
    fn drop_then_pickup_round_trips_the_stack() {
        let mut state = state_with_capacity(26);
        let here = Position::new(2, 2);
        let potion = ItemKind::Consumable(crate::state::ConsumableKind::Healing { amount: 4 });
        let first = ground_item(&mut state, "Health Potion", potion, here);
        let second = ground_item(&mut state, "Health Potion", potion, here);
        resolve(&mut state, Action::PickUp).unwrap();
        resolve(&mut state, Action::PickUp).unwrap();

        resolve(&mut state, Action::Drop { key: InvKey('a') }).unwrap();
        assert!(state.entities.player().inventory.is_empty());
        assert_eq!(state.entities.item(first).unwrap().position, Some(here));

        resolve(&mut state, Action::PickUp).unwrap();
        resolve(&mut state, Action::PickUp).unwrap();
        let stack = state.entities.player().inventory.stack(InvKey('a')).unwrap();
        assert_eq!(stack.len(), 2);
        assert!(stack.contains(&first) && stack.contains(&second));
    }

    #[test]
    fn dropping_a_missing_key_is_impossible() {
        let mut state = state_with_capacity(26);
        let result = resolve(&mut state, Action::Drop { key: InvKey('q') });
        assert_eq!(result, Err(ActionError::impossible("You don't have that item.")));
    }

    #[test]
    fn dropping_clears_the_wielded_reference() {
        let mut state = state_with_capacity(26);
        let here = Position::new(2, 2);
        ground_item(&mut state, "Dagger", ItemKind::Weapon { damage: 2 }, here);
        resolve(&mut state, Action::PickUp).unwrap();
        resolve(&mut state, Action::Wield { key: InvKey('a') }).unwrap();
        assert_eq!(state.entities.player().inventory.wielded(), Some(InvKey('a')));

        resolve(&mut state, Action::Drop { key: InvKey('a') }).unwrap();
        assert_eq!(state.entities.player().inventory.wielded(), None);
    }

    #[test]
    fn only_weapons_wield_and_only_armor_wears() {
        let mut state = state_with_capacity(26);
        let here = Position::new(2, 2);
        ground_item(
            &mut state,
            "Leather Armor",
            ItemKind::Armor {
                defense: 1,
                slot: ArmorSlot::Body,
            },
            here,
        );
        resolve(&mut state, Action::PickUp).unwrap();

        let result = resolve(&mut state, Action::Wield { key: InvKey('a') });
        assert_eq!(result, Err(ActionError::impossible("You can't wield that.")));

        resolve(&mut state, Action::Wear { key: InvKey('a') }).unwrap();
        assert_eq!(
            state.entities.player().inventory.armor_in(ArmorSlot::Body),
            Some(InvKey('a'))
        );
        assert_eq!(state.entities.defense(EntityId::PLAYER), 1);
    }
}
