use memory_codec::{Pointer, Value};
use type_registry::TypeIndex;

/// An object to write into the application pool before the interactive
/// command commits, as part of a `PutMemory` request.
#[derive(Clone, Debug, PartialEq)]
pub struct PutObject {
    pub pointer: Pointer,
    pub type_index: TypeIndex,
    pub value: Value,
}

/// Client → core: the five requests the interactive loop accepts once a
/// command has stopped for callback.
#[derive(Clone, Debug, PartialEq)]
pub enum StreamRequest {
    PassCommand,
    DropCommand,
    PutMemory { objects: Vec<PutObject> },
    ResolveObject {
        pointer: Pointer,
        type_index: TypeIndex,
        offset: u64,
    },
    GetMemory,
}

/// A type observed within a memory range a command would read or write,
/// reported by `GetMemory` without committing the command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedRange {
    pub type_index: TypeIndex,
    pub base: u64,
    pub size: u64,
    pub root: u64,
}

/// Core → client: the response to a request that produces one.
#[derive(Clone, Debug, PartialEq)]
pub enum StreamResponse {
    ReadObject { value: Value },
    TypedRanges { ranges: Vec<TypedRange> },
}
