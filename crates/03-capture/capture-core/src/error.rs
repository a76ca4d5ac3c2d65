use thiserror::Error;

use memory_codec::MemoryError;
use replay_state::StateError;
use type_registry::TypeError;

pub type CaptureResult<T> = Result<T, CaptureError>;

/// Failure modes surfaced while mutating a command against replay state.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("type error: {0}")]
    Type(#[from] TypeError),

    #[error("memory codec error: {0}")]
    Memory(#[from] MemoryError),

    #[error("state error: {0}")]
    State(#[from] StateError),

    #[error("command {0} failed to mutate: {1}")]
    Mutation(&'static str, String),
}
