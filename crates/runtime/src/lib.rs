//! Session runtime for the turn-resolution core.
//!
//! This crate owns everything the deterministic core delegates to its
//! collaborators: the activation loop that drives NPC turns and yields for
//! player input, floor generation, and session persistence. Rendering, FOV,
//! and input decoding stay outside; they observe the session between
//! activations and feed it visibility bits and player actions.

pub mod error;
pub mod generator;
pub mod save;
pub mod session;

pub use error::EngineError;
pub use generator::{Floor, FloorGenerator, StaticFloor};
pub use save::{SaveError, SaveGame};
pub use session::{GameSession, LoopSignal, PlayerActionResult};
