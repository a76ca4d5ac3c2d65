use thiserror::Error;

use capture_core::CaptureError;
use memory_codec::MemoryError;
use replay_state::StateError;
use type_registry::TypeError;

pub type ResolveResult<T> = Result<T, ResolveError>;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("command index {index} is out of bounds (capture has {len} commands)")]
    PathOutOfBounds { index: u64, len: u64 },

    #[error("pool {0:?} was never created during the mutation prefix")]
    InvalidMemoryPool(replay_state::PoolId),

    #[error("mutation error: {0}")]
    Mutation(#[from] CaptureError),

    #[error("state error: {0}")]
    State(#[from] StateError),

    #[error("memory codec error: {0}")]
    Memory(#[from] MemoryError),

    #[error("type error: {0}")]
    Type(#[from] TypeError),
}
