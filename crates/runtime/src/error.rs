use game_core::{ActionError, SchedulerError};

/// Fatal session errors.
///
/// [`ActionError::Impossible`] never surfaces here: the session converts it
/// into a logged message (player) or a forfeited turn (AI). Anything that
/// does arrive means a core invariant was broken.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("fatal action failure: {0}")]
    Action(ActionError),

    #[error("player action submitted outside the player's turn")]
    NotAwaitingInput,
}
