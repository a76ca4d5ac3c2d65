use crate::pool::PoolId;

/// Instrumentation hooks fired around pool access. A [`crate::GlobalState`]
/// holds at most one observer at a time; installing a new one (as the memory
/// resolver does when replaying a mutation prefix) replaces the previous.
pub trait PoolObserver {
    /// Called after `len` bytes were successfully read from `pool` at `addr`.
    fn on_read(&mut self, pool: PoolId, addr: u64, len: u64) {
        let _ = (pool, addr, len);
    }

    /// Called after `len` bytes were written into `pool` at `addr`.
    fn on_write(&mut self, pool: PoolId, addr: u64, len: u64) {
        let _ = (pool, addr, len);
    }

    /// Called when `size` bytes at `addr` in `pool` become mapped for the
    /// first time via [`crate::Pool::create`].
    fn on_create(&mut self, pool: PoolId, addr: u64, size: u64) {
        let _ = (pool, addr, size);
    }
}

/// An observer that does nothing; the default when no instrumentation is
/// installed.
#[derive(Default)]
pub struct NullObserver;

impl PoolObserver for NullObserver {}
