use thiserror::Error;

use crate::pool::PoolId;

pub type StateResult<T> = Result<T, StateError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("pool {0:?} is not present in this state")]
    UnknownPool(PoolId),

    #[error("pool {0:?} already exists")]
    PoolAlreadyExists(PoolId),

    #[error("read of {len} byte(s) at address {addr:#x} in pool {pool:?} covers unmapped memory")]
    UnmappedRange { pool: PoolId, addr: u64, len: u64 },
}
