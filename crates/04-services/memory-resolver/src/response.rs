use replay_state::Range;
use type_registry::TypeIndex;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedRange {
    pub type_index: TypeIndex,
    pub base: u64,
    pub size: u64,
    pub root: u64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryResponse {
    pub data: Option<Vec<u8>>,
    pub reads: Vec<Range>,
    pub writes: Vec<Range>,
    pub observed: Vec<Range>,
    pub typed_ranges: Vec<TypedRange>,
}
