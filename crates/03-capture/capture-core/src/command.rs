use replay_state::{GlobalState, PoolObserver};
use type_registry::{MemoryLayout, TypeRegistry};

use crate::error::CaptureResult;
use crate::observation::Observation;
use crate::sub_cmd_idx::SubCmdIdx;

/// Stable identity of a command within a capture, independent of its
/// position in any particular sub-slice being replayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CommandId(pub u64);

/// Read-only context threaded through every `mutate` call: the type table
/// and memory layout a command's encoded arguments are boxed/unboxed
/// against.
pub struct MutateContext<'a> {
    pub types: &'a TypeRegistry,
    pub layout: &'a MemoryLayout,
}

/// Lets a command emit further commands to run immediately after it, used by
/// the command splitter to interleave synthetic commands at a cut point
/// without rewriting the surrounding capture.
pub trait CommandBuilder {
    fn insert_after(&mut self, cmd: Box<dyn Command>);
}

/// One replayable unit of work against a [`GlobalState`].
///
/// `mutate` is the only required method; `observations` defaults to empty
/// for commands that never touch application memory directly (submission
/// wrappers, markers). `clone_command` backs `Clone for Box<dyn Command>`
/// below — commands typically hold their encoded argument bytes behind an
/// `Arc`, so cloning the box is cheap even though the command itself may
/// have been produced inside a forked arena.
pub trait Command {
    fn cmd_name(&self) -> &str;

    fn mutate(
        &self,
        ctx: &MutateContext,
        id: CommandId,
        state: &mut GlobalState,
        builder: Option<&mut dyn CommandBuilder>,
        watcher: Option<&mut dyn PoolObserver>,
    ) -> CaptureResult<()>;

    fn observations(&self) -> &[Observation] {
        &[]
    }

    fn sub_commands(&self) -> &[SubCmdIdx] {
        &[]
    }

    fn clone_command(&self) -> Box<dyn Command>;

    /// Exposes this command's queue-submission shape to the command
    /// splitter, for the one command kind per API that carries nested
    /// sub-commands a client can cut at (Vulkan's `VkQueueSubmit`, or
    /// whatever the equivalent is for another graphics API). `None` for
    /// every other command, including the default.
    fn as_queue_submit(&self) -> Option<&dyn QueueSubmit> {
        None
    }
}

impl Clone for Box<dyn Command> {
    fn clone(&self) -> Box<dyn Command> {
        self.clone_command()
    }
}

/// One command buffer's worth of already-recorded sub-commands, as attached
/// to a single `VkSubmitInfo` inside a [`QueueSubmit`]. The command splitter
/// replays a prefix of `references` into a freshly allocated buffer when a
/// requested cut falls inside this submit info.
pub struct SubmitInfo {
    pub command_buffer: u64,
    pub references: Vec<Box<dyn Command>>,
}

impl Clone for SubmitInfo {
    fn clone(&self) -> Self {
        SubmitInfo {
            command_buffer: self.command_buffer,
            references: self.references.iter().map(|c| c.clone_command()).collect(),
        }
    }
}

/// A command that submits one or more pre-recorded command buffers to a
/// queue, and so is the one place a sub-command cut can land. Implemented by
/// whatever API-specific command plays the role of Vulkan's `VkQueueSubmit`.
pub trait QueueSubmit: Command {
    fn queue_family(&self) -> u64;

    fn submit_infos(&self) -> &[SubmitInfo];

    /// Builds a clone of this command with `submit_infos` replacing its own,
    /// carrying over everything else (queue, fence, extras).
    fn with_submit_infos(&self, submit_infos: Vec<SubmitInfo>) -> Box<dyn Command>;
}
