use serde::{Deserialize, Serialize};

use crate::common::{TypeRef, WirePointer, WireValue};

/// An object to write into memory before the next command runs, as part of
/// a `PutMemory` request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PutObject {
    pub pointer: WirePointer,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    pub value: WireValue,
}

/// Client → core: the five requests the stream loop accepts between
/// commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "request")]
pub enum StreamRequest {
    PassCommand,
    DropCommand,
    PutMemory { objects: Vec<PutObject> },
    ResolveObject {
        pointer: WirePointer,
        #[serde(rename = "type")]
        ty: TypeRef,
        offset: u64,
    },
    GetMemory,
}

/// A type observed within a memory range. `root` is the address of the
/// enclosing value this range was decoded as part of (equal to `base` for a
/// range that is itself a root value).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypedRange {
    #[serde(rename = "type")]
    pub ty: TypeRef,
    pub api: String,
    pub base: u64,
    pub size: u64,
    pub root: u64,
}

/// Core → client: the response to a stream request, or an out-of-band
/// notice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "response")]
pub enum StreamResponse {
    Callback { command: u64 },
    ReadObject { value: WireValue },
    TypedRanges { ranges: Vec<TypedRange> },
    InitialCommandsDone,
    Error { message: String },
    Done,
}
