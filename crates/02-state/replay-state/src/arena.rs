use crate::global_state::GlobalState;
use crate::observer::NullObserver;
use crate::pool::PoolId;

/// Produces an isolated, speculative copy of a [`GlobalState`] so a caller
/// (the stream controller's backup-state commit path) can apply mutations
/// that might be discarded without disturbing the state other observers see.
///
/// `GlobalState`'s pools hold owned byte maps with no shared backing storage,
/// so forking is a full clone rather than copy-on-write; correctness over a
/// sharing optimization that this core's single-threaded, one-fork-at-a-time
/// usage does not need.
pub struct Arena;

impl Arena {
    /// Deep-clones every pool in `base` into a fresh `GlobalState` with no
    /// observer installed (the fork starts uninstrumented; callers that need
    /// hooks during speculation install their own).
    pub fn fork(base: &GlobalState) -> GlobalState {
        let mut forked = GlobalState::new();
        forked.replace_pools(base.clone_pools());
        forked.set_observer(Box::new(NullObserver));
        forked
    }
}
