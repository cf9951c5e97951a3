use serde::{Deserialize, Serialize};

use super::{EntityId, Inventory, Position, RenderPriority, Rgb};
use crate::ai::AiState;
use crate::config::GameConfig;

/// Combat block for an actor: hit points, base combat values, and per-action
/// delays. Derived values that consult equipment live on
/// [`super::EntitiesState`] because they need arena lookups.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    max_hp: i32,
    hp: i32,
    /// Defense used when no armor is worn.
    pub base_defense: i32,
    /// Melee damage used when no weapon is wielded.
    pub unarmed_damage: i32,
    /// Ticks one step of movement costs this actor.
    pub move_delay: u64,
    /// Ticks one melee swing costs this actor.
    pub melee_delay: u64,
}

impl Fighter {
    pub fn new(hp: i32, base_defense: i32, unarmed_damage: i32) -> Self {
        Self {
            max_hp: hp,
            hp,
            base_defense,
            unarmed_damage,
            move_delay: GameConfig::BASE_DELAY,
            melee_delay: GameConfig::BASE_DELAY,
        }
    }

    pub fn with_delays(mut self, move_delay: u64, melee_delay: u64) -> Self {
        self.move_delay = move_delay;
        self.melee_delay = melee_delay;
        self
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    /// Writes HP, clamped to `[0, max_hp]`. Returns the stored value.
    ///
    /// Death side effects are not handled here; all damage flows through
    /// [`crate::combat`], which watches for the 0 transition.
    pub fn set_hp(&mut self, value: i32) -> i32 {
        self.hp = value.clamp(0, self.max_hp);
        self.hp
    }
}

/// An actor record in the entity arena.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorEntity {
    pub id: EntityId,
    pub name: String,
    pub glyph: char,
    pub color: Rgb,
    pub position: Position,
    pub blocks_movement: bool,
    pub render_priority: RenderPriority,
    pub fighter: Fighter,
    pub inventory: Inventory,
    /// Strategy that produces this actor's next action. `None` exactly when
    /// the actor is dead; death clears it irreversibly.
    pub behavior: Option<AiState>,
}

impl ActorEntity {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        glyph: char,
        color: Rgb,
        position: Position,
        fighter: Fighter,
        inventory: Inventory,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            glyph,
            color,
            position,
            blocks_movement: true,
            render_priority: RenderPriority::Actor,
            fighter,
            inventory,
            behavior: Some(AiState::hostile()),
        }
    }

    /// An actor can act as long as it still has a behavior.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.behavior.is_some()
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        self.id.is_player()
    }
}
