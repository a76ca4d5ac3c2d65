use std::collections::BTreeMap;

use crate::error::{StateError, StateResult};

/// Identifies one of the (possibly many) independent address spaces tracked
/// by a [`crate::GlobalState`]. Pool `0` is conventionally the application
/// pool; capture data may allocate further pools for device-local memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoolId(pub u32);

/// The pool every capture's observations apply against by default: the
/// target process's own address space, as opposed to a device-local pool a
/// command may allocate for itself.
pub const APPLICATION_POOL: PoolId = PoolId(0);

/// A contiguous, fully-mapped span `[base, base + size)` within a pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Range {
    pub base: u64,
    pub size: u64,
}

impl Range {
    pub fn end(&self) -> u64 {
        self.base + self.size
    }

    pub fn overlaps(&self, other: &Range) -> bool {
        self.base < other.end() && other.base < self.end()
    }

    /// The overlap between `self` and `other`, or `None` if they don't
    /// intersect.
    pub fn intersect(&self, other: &Range) -> Option<Range> {
        let base = self.base.max(other.base);
        let end = self.end().min(other.end());
        (base < end).then(|| Range { base, size: end - base })
    }
}

/// A sparse byte-addressed memory space. Only bytes that have been written
/// or explicitly created are present; reading an address that was never
/// mapped is an error rather than an implicit zero.
#[derive(Clone, Debug)]
pub struct Pool {
    id: PoolId,
    bytes: BTreeMap<u64, u8>,
}

impl Pool {
    pub fn new(id: PoolId) -> Self {
        Pool {
            id,
            bytes: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> PoolId {
        self.id
    }

    /// Zero-fills `size` bytes starting at `addr`, mapping them into the
    /// pool without requiring a prior write. Mirrors `OnCreate`: the first
    /// time an allocation becomes visible, before any bytes are known.
    pub fn create(&mut self, addr: u64, size: u64) {
        for offset in 0..size {
            self.bytes.entry(addr + offset).or_insert(0);
        }
    }

    /// Writes `data` starting at `addr`, mapping any previously-unmapped
    /// bytes it touches.
    pub fn write(&mut self, addr: u64, data: &[u8]) {
        for (offset, byte) in data.iter().enumerate() {
            self.bytes.insert(addr + offset as u64, *byte);
        }
    }

    /// Reads `len` bytes starting at `addr`. Every byte in the range must
    /// already be mapped (via [`Pool::write`] or [`Pool::create`]).
    pub fn read(&self, addr: u64, len: u64) -> StateResult<Vec<u8>> {
        let mut out = Vec::with_capacity(len as usize);
        for offset in 0..len {
            match self.bytes.get(&(addr + offset)) {
                Some(b) => out.push(*b),
                None => {
                    return Err(StateError::UnmappedRange {
                        pool: self.id,
                        addr,
                        len,
                    })
                }
            }
        }
        Ok(out)
    }

    pub fn is_mapped(&self, addr: u64, len: u64) -> bool {
        (0..len).all(|offset| self.bytes.contains_key(&(addr + offset)))
    }

    /// Reads `len` bytes starting at `addr`, substituting `0` for any
    /// address that was never mapped. Used where a caller wants a view over
    /// a window regardless of how much of it is actually populated (the
    /// memory resolver's raw-data response), as opposed to [`Pool::read`]'s
    /// strict all-or-nothing contract used by the typed codec.
    pub fn read_filled(&self, addr: u64, len: u64) -> Vec<u8> {
        (0..len)
            .map(|offset| self.bytes.get(&(addr + offset)).copied().unwrap_or(0))
            .collect()
    }

    /// Bump-allocates `size` fresh, zero-filled bytes above the highest
    /// address currently mapped in this pool (8-byte aligned), and returns
    /// the base. Used to back a client-chosen fictional pointer with real
    /// storage when a stream commit resolves it.
    pub fn allocate(&mut self, size: u64) -> u64 {
        let next = self.bytes.keys().next_back().map(|&a| a + 1).unwrap_or(0x1000);
        let base = (next + 7) & !7;
        self.create(base, size);
        base
    }

    /// Returns the maximal contiguous mapped spans, in ascending address
    /// order.
    pub fn valid_ranges(&self) -> Vec<Range> {
        let mut ranges = Vec::new();
        let mut iter = self.bytes.keys().copied().peekable();
        while let Some(start) = iter.next() {
            let mut end = start;
            while let Some(&next) = iter.peek() {
                if next == end + 1 {
                    end = next;
                    iter.next();
                } else {
                    break;
                }
            }
            ranges.push(Range {
                base: start,
                size: end - start + 1,
            });
        }
        ranges
    }
}
