use thiserror::Error;
use type_registry::TypeError;

pub type MemoryResult<T> = Result<T, MemoryError>;

/// Failure modes surfaced while boxing/unboxing values to and from raw bytes.
#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("type error: {0}")]
    Type(#[from] TypeError),

    #[error("read past end of decoder range: wanted {want} bytes, {have} remaining")]
    OutOfBounds { want: u64, have: u64 },

    #[error("cannot decode {0} from memory")]
    UnsupportedDecode(&'static str),

    #[error("cannot encode {0} to memory")]
    UnsupportedEncode(&'static str),

    #[error("a zero-size range cannot be decoded as a slice")]
    UnsizedSlice,

    #[error("struct value has {got} fields, type declares {want}")]
    StructArity { got: usize, want: usize },

    #[error("array value has {got} entries, type declares {want}")]
    ArrayArity { got: usize, want: usize },

    #[error("value shape does not match type: expected {0}")]
    ShapeMismatch(&'static str),
}
