//! Sparse, instrumented address spaces for command replay: [`Pool`] is one
//! address space, [`GlobalState`] is the collection of pools a replay sees,
//! and [`Arena`] forks a [`GlobalState`] for speculative mutation.

mod arena;
mod error;
mod global_state;
mod observer;
mod pool;

pub use arena::Arena;
pub use error::{StateError, StateResult};
pub use global_state::GlobalState;
pub use observer::{NullObserver, PoolObserver};
pub use pool::{Pool, PoolId, Range, APPLICATION_POOL};
