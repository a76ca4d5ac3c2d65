use std::collections::HashMap;

use capture_core::ContentId;
use sha2::{Digest, Sha256};

/// Content-addressed blob store backing commit-time `PutMemory` writes: a
/// buffer's [`ContentId`] is its sha256 digest, so the same bytes written by
/// two different objects collapse to one stored copy.
#[derive(Default)]
pub struct ContentStore {
    blobs: HashMap<ContentId, Vec<u8>>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, bytes: Vec<u8>) -> ContentId {
        let digest = Sha256::digest(&bytes);
        let id = ContentId(digest.into());
        self.blobs.entry(id).or_insert(bytes);
        id
    }

    pub fn get(&self, id: ContentId) -> Option<&[u8]> {
        self.blobs.get(&id).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identical_bytes_share_one_entry() {
        let mut store = ContentStore::new();
        let a = store.insert(vec![1, 2, 3]);
        let b = store.insert(vec![1, 2, 3]);
        assert_eq!(a, b);
        assert_eq!(store.get(a), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn different_bytes_get_different_ids() {
        let mut store = ContentStore::new();
        let a = store.insert(vec![1, 2, 3]);
        let b = store.insert(vec![4, 5, 6]);
        assert_ne!(a, b);
    }
}
