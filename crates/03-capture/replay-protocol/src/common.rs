use serde::{Deserialize, Serialize};

/// Wire form of a pointer value: an address plus whether it's a client-
/// chosen synthetic address awaiting resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePointer {
    pub address: u64,
    #[serde(default)]
    pub fictional: bool,
}

/// Wire reference to a registered type, by stable index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    pub index: u32,
}

/// Wire form of a command/sub-command path. Kept as a bare `Vec<u64>`
/// independent of `capture_core::SubCmdIdx`'s `SmallVec` representation —
/// the wire format should not change shape when the in-memory one does.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireSubCmdIdx(pub Vec<u64>);

/// A contiguous byte range within a pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRange {
    pub base: u64,
    pub size: u64,
}

/// Wire form of an observed memory range and the content hash of the bytes
/// involved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationWire {
    pub pool: u32,
    pub range: WireRange,
    pub content_id: String,
}

/// A decoded value as it crosses the wire. Mirrors
/// `memory_codec::Value` structurally but serializes through `serde` instead
/// of carrying the codec crate as a protocol dependency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum WireValue {
    Pod { json: serde_json::Value },
    Pointer { pointer: WirePointer },
    Struct { fields: Vec<WireValue> },
    Array { entries: Vec<WireValue> },
    Slice { entries: Vec<WireValue> },
}
