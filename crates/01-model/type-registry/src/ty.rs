use smallvec::SmallVec;

/// Stable identifier for a registered [`Type`]. Indices are assigned by the
/// capture's original type table and never reused within a capture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeIndex(pub u32);

/// Plain-old-data scalar kinds whose width is fixed independent of layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PodKind {
    UInt,
    SInt,
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    Bool,
    /// Length-prefixed byte string; has no fixed byte size.
    String,
    F32,
    F64,
}

/// Scalar kinds whose width is derived from the active [`crate::MemoryLayout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizedKind {
    SizedInt,
    SizedUInt,
    SizedSize,
    SizedChar,
}

/// A named field within a [`Type::Struct`], in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructField {
    pub name: String,
    pub ty: TypeIndex,
}

/// A C-ABI-shaped type descriptor, identified elsewhere by [`TypeIndex`].
///
/// Invariant: `Alignment(t) <= Size(t)` for every concrete `t` (everything
/// except `Map`, `Reference`, bare `Slice`, and `Pod(String)`, none of which
/// have a fixed byte size). `Pseudonym` and `Enum` delegate both size and
/// alignment to their underlying type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    Pod(PodKind),
    Sized(SizedKind),
    Pointer(TypeIndex),
    Struct(SmallVec<[StructField; 8]>),
    Array(TypeIndex, u64),
    Slice(TypeIndex),
    Pseudonym(TypeIndex),
    Enum(TypeIndex),
    Map,
    Reference,
}

impl Type {
    pub fn struct_of(fields: impl IntoIterator<Item = (impl Into<String>, TypeIndex)>) -> Type {
        Type::Struct(
            fields
                .into_iter()
                .map(|(name, ty)| StructField {
                    name: name.into(),
                    ty,
                })
                .collect(),
        )
    }
}
