//! Wire-level request/response shapes for the stream controller, memory
//! resolver, and command splitter. Plain `serde`-derived types; no crate
//! here owns replay semantics, only the message shapes that cross the
//! client/core boundary.

mod common;
mod memory;
mod splitter;
mod stream;

pub use common::{ObservationWire, TypeRef, WirePointer, WireRange, WireSubCmdIdx, WireValue};
pub use memory::{AfterPoint, MemoryPath, MemoryResponse};
pub use splitter::SplitRequest;
pub use stream::{PutObject, StreamRequest, StreamResponse, TypedRange};
