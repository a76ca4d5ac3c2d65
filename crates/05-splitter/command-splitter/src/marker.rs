use capture_core::{CaptureError, Command, CommandBuilder, CommandId, MutateContext, SubCmdIdx};
use replay_state::{GlobalState, PoolObserver};

/// A synthetic command marking where a requested cut landed in the rewritten
/// stream. Not a polymorphic "event" class — a distinct variant of the
/// command sum type, same as every other command. `mutate` is a no-op when
/// replayed for state (the cut already happened by the time this lands,
/// since the splitter emits it immediately after the command or buffer it
/// cuts); it errors if it ever reaches a builder, because by then it should
/// already have been lowered into whatever wire form the replay target
/// understands.
pub struct InsertionMarker {
    pub command_buffer: u64,
    pub idx: SubCmdIdx,
    pub callee: Box<dyn Command>,
}

impl Command for InsertionMarker {
    fn cmd_name(&self) -> &str {
        "CommandBufferInsertion"
    }

    fn mutate(
        &self,
        _ctx: &MutateContext,
        _id: CommandId,
        _state: &mut GlobalState,
        builder: Option<&mut dyn CommandBuilder>,
        _watcher: Option<&mut dyn PoolObserver>,
    ) -> capture_core::CaptureResult<()> {
        if builder.is_some() {
            return Err(CaptureError::Mutation(
                "CommandBufferInsertion",
                "must be lowered before it reaches the builder".to_string(),
            ));
        }
        Ok(())
    }

    fn clone_command(&self) -> Box<dyn Command> {
        Box::new(InsertionMarker {
            command_buffer: self.command_buffer,
            idx: self.idx.clone(),
            callee: self.callee.clone_command(),
        })
    }
}
