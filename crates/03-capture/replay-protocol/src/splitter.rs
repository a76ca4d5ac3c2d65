use serde::{Deserialize, Serialize};

use crate::common::WireSubCmdIdx;

/// Accumulates a request to cut the command stream at `id`, reserving room
/// for `extra_commands` synthetic commands the splitter will emit there.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRequest {
    pub extra_commands: u32,
    pub id: WireSubCmdIdx,
}
