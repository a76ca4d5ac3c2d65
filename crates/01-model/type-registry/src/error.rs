use thiserror::Error;

use crate::ty::TypeIndex;

pub type TypeResult<T> = Result<T, TypeError>;

/// Failure modes surfaced by the type registry.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TypeError {
    /// The registry has no type registered at this index.
    #[error("incomplete type: no type registered at index {0:?}")]
    IncompleteType(TypeIndex),

    /// A caller attempted to register a second type at an already-occupied
    /// index. The registry is write-once per index.
    #[error("type index {0:?} is already registered")]
    AlreadyRegistered(TypeIndex),

    /// `Size`/`Alignment` was asked for a type with no fixed byte size
    /// (a bare `Map`, `Reference`, `Slice`, or the dynamically-sized `Pod`
    /// string variant).
    #[error("type has no fixed size for this layout: {0}")]
    DynamicallySized(&'static str),
}
