use thiserror::Error;

use capture_core::CaptureError;
use memory_codec::MemoryError;
use replay_state::{PoolId, StateError};
use type_registry::TypeError;

pub type StreamResult<T> = Result<T, StreamError>;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("client cancelled the stream")]
    Cancelled,

    #[error("pool {0:?} was never created")]
    InvalidMemoryPool(PoolId),

    #[error("mutation error: {0}")]
    Mutation(#[from] CaptureError),

    #[error("state error: {0}")]
    State(#[from] StateError),

    #[error("memory codec error: {0}")]
    Memory(#[from] MemoryError),

    #[error("type error: {0}")]
    Type(#[from] TypeError),
}
