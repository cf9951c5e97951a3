//! Spawnable entity templates.

use serde::{Deserialize, Serialize};

use game_core::{
    ActorEntity, EntitiesState, EntityId, Fighter, Inventory, ItemEntity, ItemKind, Position, Rgb,
};

/// Blueprint for an actor; spawning clones it and assigns id + position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorTemplate {
    pub name: String,
    pub glyph: char,
    pub color: Rgb,
    pub fighter: Fighter,
    pub inventory_capacity: usize,
}

impl ActorTemplate {
    /// Builds an actor record with the given id. Use [`ActorTemplate::spawn`]
    /// for NPCs; the player is built directly with [`EntityId::PLAYER`].
    pub fn build(&self, id: EntityId, position: Position) -> ActorEntity {
        ActorEntity::new(
            id,
            self.name.clone(),
            self.glyph,
            self.color,
            position,
            self.fighter.clone(),
            Inventory::new(self.inventory_capacity),
        )
    }

    /// Clones this template into the arena as a freshly-allocated NPC.
    pub fn spawn(&self, entities: &mut EntitiesState, position: Position) -> EntityId {
        let id = entities.allocate_id();
        entities.insert_actor(self.build(id, position))
    }
}

/// Blueprint for an item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub name: String,
    pub glyph: char,
    pub color: Rgb,
    pub kind: ItemKind,
}

impl ItemTemplate {
    /// Clones this template onto the floor at `position`.
    pub fn spawn_at(&self, entities: &mut EntitiesState, position: Position) -> EntityId {
        let id = entities.allocate_id();
        let mut item = ItemEntity::new(id, self.name.clone(), self.glyph, self.color, self.kind);
        item.position = Some(position);
        entities.insert_item(item)
    }
}
