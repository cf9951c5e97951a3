use serde::{Deserialize, Serialize};

use super::{EntityId, Position, RenderPriority, Rgb};
use crate::state::inventory::ArmorSlot;

/// Item type with type-specific data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Wieldable melee weapon.
    Weapon { damage: i32 },
    /// Wearable armor occupying one body slot.
    Armor { defense: i32, slot: ArmorSlot },
    /// Single-use item activated against an action context.
    Consumable(ConsumableKind),
}

impl ItemKind {
    pub fn weapon_damage(&self) -> Option<i32> {
        match self {
            ItemKind::Weapon { damage } => Some(*damage),
            _ => None,
        }
    }

    pub fn armor(&self) -> Option<(i32, ArmorSlot)> {
        match self {
            ItemKind::Armor { defense, slot } => Some((*defense, *slot)),
            _ => None,
        }
    }

    pub fn consumable(&self) -> Option<ConsumableKind> {
        match self {
            ItemKind::Consumable(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// Effects a consumable can apply when activated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsumableKind {
    /// Restore up to `amount` HP to the drinker.
    Healing { amount: i32 },
    /// Strike the nearest visible actor within `range` tiles.
    Lightning { damage: i32, range: i32 },
    /// Replace the target actor's behavior with confusion for `turns` turns.
    Confusion { turns: u32 },
    /// Damage every actor within `radius` of the target tile.
    Fireball { damage: i32, radius: i32 },
}

/// An item record in the entity arena.
///
/// `position` is `Some` while the item lies on the floor and `None` while an
/// inventory references it; the owning container is a lookup, never a
/// back-pointer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEntity {
    pub id: EntityId,
    pub name: String,
    pub glyph: char,
    pub color: Rgb,
    pub position: Option<Position>,
    pub render_priority: RenderPriority,
    pub kind: ItemKind,
}

impl ItemEntity {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        glyph: char,
        color: Rgb,
        kind: ItemKind,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            glyph,
            color,
            position: None,
            render_priority: RenderPriority::Item,
            kind,
        }
    }
}
