use crate::state::{EntityId, InvKey};

/// Errors surfaced by action resolution.
///
/// `Impossible` is the only user-recoverable kind: the caller shows the
/// message and must not advance scheduling. Every other variant means a
/// state invariant was broken and must be treated as fatal, never swallowed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// Locally-recoverable invalid action; no state was mutated and no time
    /// elapsed.
    #[error("{0}")]
    Impossible(String),

    #[error("actor {0} is not in the world")]
    MissingActor(EntityId),

    #[error("item {0} is not in the world")]
    MissingItem(EntityId),

    #[error("inventory key '{0}' references no stack")]
    MissingKey(InvKey),
}

impl ActionError {
    pub fn impossible(message: impl Into<String>) -> Self {
        Self::Impossible(message.into())
    }

    pub fn is_impossible(&self) -> bool {
        matches!(self, Self::Impossible(_))
    }
}
