//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content: templates for actors and items,
//! the built-in catalog mirroring the stock bestiary and item set, and RON
//! loaders for worlds that define their own. Templates are consumed by the
//! runtime's floor generation and never appear in game state; spawning
//! clones a template into the entity arena.

pub mod catalog;
pub mod templates;

pub use catalog::{ActorCatalog, ItemCatalog};
pub use templates::{ActorTemplate, ItemTemplate};
