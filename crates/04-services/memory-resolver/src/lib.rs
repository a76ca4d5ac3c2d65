//! Path-based memory resolution: given a point in a capture's mutation and a
//! byte window, replays the mutation prefix and answers what's mapped there,
//! or decodes it directly as a type.

mod error;
mod path;
mod range_merge;
mod resolver;
mod response;

pub use error::{ResolveError, ResolveResult};
pub use path::{AfterPoint, MemoryPath};
pub use resolver::{resolve_memory, resolve_memory_as_type};
pub use response::{MemoryResponse, TypedRange};
