use serde::{Deserialize, Serialize};

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Additive pathfinding cost for tiles occupied by a movement-blocking
    /// entity. Lower values make enemies crowd behind each other in
    /// corridors; higher values make them take longer routes to surround
    /// their target.
    pub crowd_penalty: u32,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Base tick cost for waiting and inventory manipulation.
    pub const BASE_DELAY: u64 = 10;
    /// Tick cost charged when an AI action resolves as impossible, so a
    /// failed attempt still spends a turn instead of stalling the scheduler.
    pub const FALLBACK_DELAY: u64 = 10;
    /// Fixed alphabet for inventory keys; also the hard cap on distinct
    /// stacks any inventory can hold.
    pub const INVENTORY_KEYS: &'static str = "abcdefghijklmnopqrstuvwxyz";

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CROWD_PENALTY: u32 = 10;

    pub fn new() -> Self {
        Self {
            crowd_penalty: Self::DEFAULT_CROWD_PENALTY,
        }
    }

    pub fn with_crowd_penalty(crowd_penalty: u32) -> Self {
        Self { crowd_penalty }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
