use serde::{Deserialize, Serialize};

use crate::common::{ObservationWire, TypeRef, WireSubCmdIdx};
use crate::stream::TypedRange;

/// Identifies the point in a capture a memory path resolves "after": the
/// mutation prefix to replay is every command up to and including
/// `cmd_index`, followed by the sub-commands named in `sub_indices`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AfterPoint {
    pub cmd_index: u64,
    #[serde(default)]
    pub sub_indices: WireSubCmdIdx,
}

/// A request to the memory resolver for a byte range, optionally narrowed to
/// one type at an offset, with flags controlling what accompanies the raw
/// bytes in the response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemoryPath {
    pub capture: String,
    pub after: AfterPoint,
    pub pool: u32,
    pub address: u64,
    pub size: u64,
    #[serde(rename = "type", default)]
    pub ty: Option<TypeRef>,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub include_types: bool,
    #[serde(default)]
    pub exclude_observed: bool,
    #[serde(default)]
    pub exclude_data: bool,
}

/// The memory resolver's response: raw bytes (unless suppressed), the
/// observations the replayed prefix recorded overlapping the range, and any
/// typed-range annotations requested.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryResponse {
    #[serde(default)]
    pub data: Option<Vec<u8>>,
    #[serde(default)]
    pub reads: Vec<ObservationWire>,
    #[serde(default)]
    pub writes: Vec<ObservationWire>,
    #[serde(default)]
    pub observed: Vec<ObservationWire>,
    #[serde(default)]
    pub typed_ranges: Vec<TypedRange>,
}
