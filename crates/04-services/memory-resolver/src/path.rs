use capture_core::SubCmdIdx;
use replay_state::PoolId;
use type_registry::TypeIndex;

/// Names the point in a capture's mutation a query resolves against: replay
/// every command strictly before `cmd_index`, plus `cmd_index` itself.
///
/// `sub_indices` records the sub-command path the caller asked for, but this
/// generic core mutates whole top-level commands rather than partial
/// sub-command prefixes — splitting a command at a sub-command boundary is
/// the command splitter's job (component H), not the resolver's. The field
/// is kept on the path so a caller building on top of the splitter can stamp
/// the sub-path it split at.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AfterPoint {
    pub cmd_index: u64,
    pub sub_indices: SubCmdIdx,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryPath {
    pub after: AfterPoint,
    pub pool: PoolId,
    pub address: u64,
    pub size: u64,
    pub type_index: Option<TypeIndex>,
    pub offset: Option<u64>,
    pub include_types: bool,
    pub exclude_observed: bool,
    pub exclude_data: bool,
}
