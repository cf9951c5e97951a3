//! Session persistence.
//!
//! A [`SaveGame`] holds everything needed to reconstruct a session exactly:
//! the actor graph with inventories, the scheduler queue with its tick and
//! sequence counters (so tie-break ordering survives a reload), the message
//! log, and the config. Encoding is bincode; the RNG stream and the floor
//! generator are supplied fresh on restore.

use std::path::Path;

use serde::{Deserialize, Serialize};

use game_core::{GameConfig, GameState, MessageLog, TurnScheduler};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SaveGame {
    pub state: GameState,
    pub scheduler: TurnScheduler,
    pub log: MessageLog,
    pub config: GameConfig,
    pub depth: u32,
    pub awaiting_player: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("failed to encode save: {0}")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode save: {0}")]
    Decode(#[source] bincode::Error),

    #[error("failed to access save file: {0}")]
    Io(#[from] std::io::Error),
}

impl SaveGame {
    pub fn encode(&self) -> Result<Vec<u8>, SaveError> {
        bincode::serialize(self).map_err(SaveError::Encode)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, SaveError> {
        bincode::deserialize(bytes).map_err(SaveError::Decode)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), SaveError> {
        let bytes = self.encode()?;
        std::fs::write(path, bytes)?;
        tracing::debug!(path = %path.display(), "saved session");
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Self, SaveError> {
        let bytes = std::fs::read(path)?;
        tracing::debug!(path = %path.display(), "loaded session");
        Self::decode(&bytes)
    }
}
