use serde::{Deserialize, Serialize};

use super::{ActorEntity, EntityId, ItemEntity, Position};
use crate::state::inventory::ArmorSlot;
use strum::IntoEnumIterator;

/// Arena of every entity on the current floor, indexed by stable ids.
///
/// Containers reference entities by id: the floor "contains" the items whose
/// `position` is `Some`, and an inventory contains the ids it lists. The
/// player record always exists, even after death.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitiesState {
    next_id: u32,
    player: ActorEntity,
    npcs: Vec<ActorEntity>,
    items: Vec<ItemEntity>,
}

impl EntitiesState {
    pub fn new(player: ActorEntity) -> Self {
        Self {
            next_id: 1,
            player,
            npcs: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Allocates a new unique id. Ids are never reused.
    pub fn allocate_id(&mut self) -> EntityId {
        if self.next_id == EntityId::PLAYER.0 {
            self.next_id += 1;
        }
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn player(&self) -> &ActorEntity {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut ActorEntity {
        &mut self.player
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorEntity> {
        if self.player.id == id {
            return Some(&self.player);
        }
        self.npcs.iter().find(|actor| actor.id == id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorEntity> {
        if self.player.id == id {
            return Some(&mut self.player);
        }
        self.npcs.iter_mut().find(|actor| actor.id == id)
    }

    /// All actors, player first, then NPCs in spawn order.
    pub fn all_actors(&self) -> impl Iterator<Item = &ActorEntity> {
        std::iter::once(&self.player).chain(self.npcs.iter())
    }

    pub fn item(&self, id: EntityId) -> Option<&ItemEntity> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn item_mut(&mut self, id: EntityId) -> Option<&mut ItemEntity> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub fn all_items(&self) -> impl Iterator<Item = &ItemEntity> {
        self.items.iter()
    }

    pub fn insert_actor(&mut self, actor: ActorEntity) -> EntityId {
        let id = actor.id;
        self.npcs.push(actor);
        id
    }

    pub fn insert_item(&mut self, item: ItemEntity) -> EntityId {
        let id = item.id;
        self.items.push(item);
        id
    }

    /// Removes an item from the arena entirely (consumed, not dropped).
    pub fn remove_item(&mut self, id: EntityId) -> Option<ItemEntity> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// The living actor standing at `position`, if any.
    pub fn actor_at(&self, position: Position) -> Option<&ActorEntity> {
        self.all_actors()
            .find(|actor| actor.is_alive() && actor.position == position)
    }

    /// Any movement-blocking entity at `position`. Corpses do not block.
    pub fn blocking_entity_at(&self, position: Position) -> Option<EntityId> {
        self.all_actors()
            .find(|actor| actor.blocks_movement && actor.position == position)
            .map(|actor| actor.id)
    }

    /// Ids of items lying on the floor at `position`, in arena order.
    pub fn items_at(&self, position: Position) -> impl Iterator<Item = &ItemEntity> {
        self.items
            .iter()
            .filter(move |item| item.position == Some(position))
    }

    /// Melee damage for an actor: wielded weapon damage, falling back to the
    /// unarmed value.
    pub fn melee_damage(&self, id: EntityId) -> i32 {
        let Some(actor) = self.actor(id) else {
            return 0;
        };
        actor
            .inventory
            .wielded()
            .and_then(|key| actor.inventory.first(key))
            .and_then(|item_id| self.item(item_id))
            .and_then(|item| item.kind.weapon_damage())
            .unwrap_or(actor.fighter.unarmed_damage)
    }

    /// Defense for an actor: base defense plus every worn piece of armor.
    pub fn defense(&self, id: EntityId) -> i32 {
        let Some(actor) = self.actor(id) else {
            return 0;
        };
        let worn: i32 = ArmorSlot::iter()
            .filter_map(|slot| actor.inventory.armor_in(slot))
            .filter_map(|key| actor.inventory.first(key))
            .filter_map(|item_id| self.item(item_id))
            .filter_map(|item| item.kind.armor().map(|(defense, _)| defense))
            .sum();
        actor.fighter.base_defense + worn
    }

    /// Clears the floor for regeneration: removes every NPC and every item
    /// not referenced by the player's inventory. The player record survives.
    pub fn clear_floor(&mut self) {
        self.npcs.clear();
        let carried: Vec<EntityId> = self
            .player
            .inventory
            .iter()
            .flat_map(|(_, stack)| stack.iter().copied())
            .collect();
        self.items.retain(|item| carried.contains(&item.id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Fighter, Inventory, ItemKind, Rgb};

    fn test_actor(id: EntityId, position: Position) -> ActorEntity {
        ActorEntity::new(
            id,
            "test subject",
            '@',
            Rgb(255, 255, 255),
            position,
            Fighter::new(10, 0, 2),
            Inventory::new(2),
        )
    }

    fn sword(id: EntityId) -> ItemEntity {
        ItemEntity::new(
            id,
            "sword",
            ')',
            Rgb(0, 191, 255),
            ItemKind::Weapon { damage: 4 },
        )
    }

    #[test]
    fn allocate_id_skips_the_player_id() {
        let mut entities = EntitiesState::new(test_actor(EntityId::PLAYER, Position::ORIGIN));
        assert_eq!(entities.allocate_id(), EntityId(1));
        assert_eq!(entities.allocate_id(), EntityId(2));
    }

    #[test]
    fn dead_actors_are_not_targets_but_corpses_keep_their_record() {
        let mut entities = EntitiesState::new(test_actor(EntityId::PLAYER, Position::ORIGIN));
        let spot = Position::new(3, 3);
        let id = entities.allocate_id();
        entities.insert_actor(test_actor(id, spot));

        assert!(entities.actor_at(spot).is_some());

        let npc = entities.actor_mut(id).unwrap();
        npc.behavior = None;
        npc.blocks_movement = false;

        assert!(entities.actor_at(spot).is_none());
        assert!(entities.blocking_entity_at(spot).is_none());
        assert!(entities.actor(id).is_some());
    }

    #[test]
    fn melee_damage_prefers_the_wielded_weapon() {
        let mut entities = EntitiesState::new(test_actor(EntityId::PLAYER, Position::ORIGIN));
        assert_eq!(entities.melee_damage(EntityId::PLAYER), 2);

        let item_id = entities.allocate_id();
        entities.insert_item(sword(item_id));
        let player = entities.player_mut();
        let key = player.inventory.insert_new_stack(item_id).unwrap();
        player.inventory.wield(key);

        assert_eq!(entities.melee_damage(EntityId::PLAYER), 4);
    }

    #[test]
    fn clear_floor_keeps_carried_items_only() {
        let mut entities = EntitiesState::new(test_actor(EntityId::PLAYER, Position::ORIGIN));
        let carried = entities.allocate_id();
        let ground = entities.allocate_id();
        entities.insert_item(sword(carried));
        let mut dropped = sword(ground);
        dropped.position = Some(Position::new(1, 1));
        entities.insert_item(dropped);
        entities
            .player_mut()
            .inventory
            .insert_new_stack(carried)
            .unwrap();

        entities.clear_floor();

        assert!(entities.item(carried).is_some());
        assert!(entities.item(ground).is_none());
    }
}
