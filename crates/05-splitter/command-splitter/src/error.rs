use thiserror::Error;

use capture_core::CaptureError;
use replay_state::StateError;

pub type SplitResult<T> = Result<T, SplitError>;

#[derive(Debug, Error)]
pub enum SplitError {
    #[error("command has a requested sub-command cut but is not a queue submit")]
    NotAQueueSubmit,

    #[error("mutation error: {0}")]
    Mutation(#[from] CaptureError),

    #[error("state error: {0}")]
    State(#[from] StateError),
}
