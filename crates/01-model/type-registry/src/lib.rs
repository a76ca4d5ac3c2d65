//! Process-wide type table: stable [`TypeIndex`] to C-ABI-shaped [`Type`]
//! resolution, plus the [`MemoryLayout`] that parameterizes layout-dependent
//! sizes.

mod error;
mod layout;
mod registry;
mod ty;

pub use error::{TypeError, TypeResult};
pub use layout::{Endianness, MemoryLayout};
pub use registry::TypeRegistry;
pub use ty::{PodKind, SizedKind, StructField, Type, TypeIndex};
