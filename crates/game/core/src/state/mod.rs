//! Authoritative game state representation.
//!
//! This module owns the data structures that describe the tile grid, the
//! entity arena, actors, and inventories. Collaborators read this state
//! freely between activations but mutate it only through the action resolver
//! and the dedicated collaborator seams (terrain and visibility setters).
mod actor;
mod common;
mod entities;
mod grid;
mod inventory;
mod item;

use serde::{Deserialize, Serialize};

pub use actor::{ActorEntity, Fighter};
pub use common::{EntityId, Position, RenderPriority, Rgb, Tick};
pub use entities::EntitiesState;
pub use grid::{TileFlags, TileGrid};
pub use inventory::{ArmorSlot, InvKey, Inventory};
pub use item::{ConsumableKind, ItemEntity, ItemKind};

/// Canonical snapshot of the world the resolver and AI act against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub grid: TileGrid,
    pub entities: EntitiesState,
}

impl GameState {
    pub fn new(grid: TileGrid, entities: EntitiesState) -> Self {
        Self { grid, entities }
    }
}
