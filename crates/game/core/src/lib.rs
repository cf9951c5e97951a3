//! Deterministic turn-resolution rules for the grid game.
//!
//! `game-core` defines the canonical rules (actions, combat, scheduling,
//! world state) and exposes pure APIs that can be reused by both the runtime
//! and offline tools. All state mutation flows through
//! [`action::Action::resolve`] and the combat helpers; supporting crates
//! depend on the types re-exported here.
pub mod action;
pub mod ai;
pub mod combat;
pub mod config;
pub mod log;
pub mod path;
pub mod rng;
pub mod scheduler;
pub mod state;

pub use action::{Action, ActionError, ActionOutcome, Resolution, TurnContext};
pub use ai::{AiDecision, AiState};
pub use config::GameConfig;
pub use log::{Message, MessageLog, MessageTone};
pub use rng::{DiceRoller, FixedRolls, GameRng};
pub use scheduler::{SchedulerError, TurnScheduler};
pub use state::{
    ActorEntity, ArmorSlot, ConsumableKind, EntitiesState, EntityId, Fighter, GameState, InvKey,
    Inventory, ItemEntity, ItemKind, Position, RenderPriority, Rgb, Tick, TileFlags, TileGrid,
};
