use std::collections::HashMap;

use crate::error::{StateError, StateResult};
use crate::observer::{NullObserver, PoolObserver};
use crate::pool::{Pool, PoolId, Range};

/// All address spaces live for one replay, plus the instrumentation hook
/// installed over them.
///
/// Pool `0` always exists (the application pool); further pools are created
/// on demand by capture commands that allocate device-local memory.
pub struct GlobalState {
    pools: HashMap<PoolId, Pool>,
    observer: Box<dyn PoolObserver>,
}

impl Default for GlobalState {
    fn default() -> Self {
        let mut pools = HashMap::new();
        pools.insert(PoolId(0), Pool::new(PoolId(0)));
        GlobalState {
            pools,
            observer: Box::new(NullObserver),
        }
    }
}

impl GlobalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `observer`, replacing whatever was previously watching pool
    /// access. Returns the previous observer so a caller can restore it.
    pub fn set_observer(&mut self, observer: Box<dyn PoolObserver>) -> Box<dyn PoolObserver> {
        std::mem::replace(&mut self.observer, observer)
    }

    pub fn pool(&self, id: PoolId) -> StateResult<&Pool> {
        self.pools.get(&id).ok_or(StateError::UnknownPool(id))
    }

    pub fn pool_mut(&mut self, id: PoolId) -> StateResult<&mut Pool> {
        self.pools.get_mut(&id).ok_or(StateError::UnknownPool(id))
    }

    /// Creates a new, empty pool, returning an error if `id` is already in
    /// use.
    pub fn add_pool(&mut self, id: PoolId) -> StateResult<()> {
        if self.pools.contains_key(&id) {
            return Err(StateError::PoolAlreadyExists(id));
        }
        self.pools.insert(id, Pool::new(id));
        Ok(())
    }

    pub fn create(&mut self, pool: PoolId, addr: u64, size: u64) -> StateResult<()> {
        self.pool_mut(pool)?.create(addr, size);
        self.observer.on_create(pool, addr, size);
        Ok(())
    }

    pub fn write(&mut self, pool: PoolId, addr: u64, data: &[u8]) -> StateResult<()> {
        self.pool_mut(pool)?.write(addr, data);
        self.observer.on_write(pool, addr, data.len() as u64);
        Ok(())
    }

    pub fn read(&mut self, pool: PoolId, addr: u64, len: u64) -> StateResult<Vec<u8>> {
        let data = self.pool(pool)?.read(addr, len)?;
        self.observer.on_read(pool, addr, len);
        Ok(data)
    }

    pub fn valid_ranges(&self, pool: PoolId) -> StateResult<Vec<Range>> {
        Ok(self.pool(pool)?.valid_ranges())
    }

    /// Bump-allocates `size` fresh bytes in `pool`, firing `on_create` the
    /// same as an explicit [`GlobalState::create`].
    pub fn allocate(&mut self, pool: PoolId, size: u64) -> StateResult<u64> {
        let base = self.pool_mut(pool)?.allocate(size);
        self.observer.on_create(pool, base, size);
        Ok(base)
    }

    pub(crate) fn clone_pools(&self) -> HashMap<PoolId, Pool> {
        self.pools.clone()
    }

    pub(crate) fn replace_pools(&mut self, pools: HashMap<PoolId, Pool>) {
        self.pools = pools;
    }
}
