use replay_state::PoolId;
use type_registry::TypeIndex;

/// Content-addressing digest for a blob of captured memory bytes. Computed
/// by whatever store owns the blob (the stream controller's content-
/// addressed backing store); this crate only carries the digest value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContentId(pub [u8; 32]);

/// A record of a memory range a command read or wrote while mutating, paired
/// with the content hash of the bytes involved. Surfaced through
/// `Command::observations` for the stream controller and memory resolver to
/// inspect without re-running the mutation. Applying a read observation
/// means overwriting `pool[base..base+size]` with the blob named by
/// `content_id` before the command that recorded it runs again.
///
/// `type_index` names the type the command interpreted this range as, when
/// it knows one (a command decoding a struct through the type registry);
/// it's `None` for untyped byte copies. The memory resolver uses it to
/// answer `include_types` requests without needing its own live
/// instrumentation hooks into the mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Observation {
    pub pool: PoolId,
    pub base: u64,
    pub size: u64,
    pub content_id: ContentId,
    pub kind: ObservationKind,
    pub type_index: Option<TypeIndex>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObservationKind {
    Read,
    Write,
}

impl Observation {
    pub fn read(pool: PoolId, base: u64, size: u64, content_id: ContentId) -> Self {
        Observation {
            pool,
            base,
            size,
            content_id,
            kind: ObservationKind::Read,
            type_index: None,
        }
    }

    pub fn write(pool: PoolId, base: u64, size: u64, content_id: ContentId) -> Self {
        Observation {
            pool,
            base,
            size,
            content_id,
            kind: ObservationKind::Write,
            type_index: None,
        }
    }

    pub fn with_type(mut self, type_index: TypeIndex) -> Self {
        self.type_index = Some(type_index);
        self
    }

    pub fn overlaps(&self, base: u64, size: u64) -> bool {
        let (a0, a1) = (self.base, self.base + self.size);
        let (b0, b1) = (base, base + size);
        a0 < b1 && b0 < a1
    }
}
