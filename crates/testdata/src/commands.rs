use capture_core::{
    Command, CommandBuilder, CommandId, MutateContext, Observation, QueueSubmit, SubmitInfo,
};
use replay_state::{GlobalState, PoolObserver, APPLICATION_POOL};

/// A command that performs no mutation and carries no observations, useful
/// as filler around the interactive commands a scenario actually cares
/// about.
#[derive(Clone)]
pub struct Tick(pub &'static str);

impl Command for Tick {
    fn cmd_name(&self) -> &str {
        self.0
    }

    fn mutate(
        &self,
        _ctx: &MutateContext,
        _id: CommandId,
        _state: &mut GlobalState,
        _builder: Option<&mut dyn CommandBuilder>,
        _watcher: Option<&mut dyn PoolObserver>,
    ) -> capture_core::CaptureResult<()> {
        Ok(())
    }

    fn clone_command(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

/// Writes `bytes` into the application pool at `addr`. `observations`
/// defaults to empty; scenarios exercising the memory resolver attach their
/// own via [`RecordedWrite::with_observations`] so a command can report a
/// typed range without the caller re-deriving its content hash.
#[derive(Clone)]
pub struct RecordedWrite {
    pub name: &'static str,
    pub addr: u64,
    pub bytes: Vec<u8>,
    pub observations: Vec<Observation>,
}

impl RecordedWrite {
    pub fn new(name: &'static str, addr: u64, bytes: impl Into<Vec<u8>>) -> Self {
        RecordedWrite {
            name,
            addr,
            bytes: bytes.into(),
            observations: Vec::new(),
        }
    }

    pub fn with_observations(mut self, observations: Vec<Observation>) -> Self {
        self.observations = observations;
        self
    }
}

impl Command for RecordedWrite {
    fn cmd_name(&self) -> &str {
        self.name
    }

    fn mutate(
        &self,
        _ctx: &MutateContext,
        _id: CommandId,
        state: &mut GlobalState,
        _builder: Option<&mut dyn CommandBuilder>,
        _watcher: Option<&mut dyn PoolObserver>,
    ) -> capture_core::CaptureResult<()> {
        state.write(APPLICATION_POOL, self.addr, &self.bytes)?;
        Ok(())
    }

    fn observations(&self) -> &[Observation] {
        &self.observations
    }

    fn clone_command(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

/// A command-buffer sub-command with no effect beyond its own identity,
/// standing in for whatever real per-draw command a `VkQueueSubmit`'s
/// recorded references would carry.
pub struct DrawCall(pub u32);

impl Command for DrawCall {
    fn cmd_name(&self) -> &str {
        "VkCmdDraw"
    }

    fn mutate(
        &self,
        _ctx: &MutateContext,
        _id: CommandId,
        _state: &mut GlobalState,
        _builder: Option<&mut dyn CommandBuilder>,
        _watcher: Option<&mut dyn PoolObserver>,
    ) -> capture_core::CaptureResult<()> {
        Ok(())
    }

    fn clone_command(&self) -> Box<dyn Command> {
        Box::new(DrawCall(self.0))
    }
}

/// A minimal `VkQueueSubmit` stand-in: no-op mutate, but a real
/// [`QueueSubmit`] implementation so splitter scenarios can exercise
/// within-submit and after-submit cuts without a concrete Vulkan binding.
pub struct FakeQueueSubmit {
    pub queue_family: u64,
    pub submit_infos: Vec<SubmitInfo>,
}

impl Command for FakeQueueSubmit {
    fn cmd_name(&self) -> &str {
        "VkQueueSubmit"
    }

    fn mutate(
        &self,
        _ctx: &MutateContext,
        _id: CommandId,
        _state: &mut GlobalState,
        _builder: Option<&mut dyn CommandBuilder>,
        _watcher: Option<&mut dyn PoolObserver>,
    ) -> capture_core::CaptureResult<()> {
        Ok(())
    }

    fn clone_command(&self) -> Box<dyn Command> {
        Box::new(FakeQueueSubmit {
            queue_family: self.queue_family,
            submit_infos: self.submit_infos.clone(),
        })
    }

    fn as_queue_submit(&self) -> Option<&dyn QueueSubmit> {
        Some(self)
    }
}

impl QueueSubmit for FakeQueueSubmit {
    fn queue_family(&self) -> u64 {
        self.queue_family
    }

    fn submit_infos(&self) -> &[SubmitInfo] {
        &self.submit_infos
    }

    fn with_submit_infos(&self, submit_infos: Vec<SubmitInfo>) -> Box<dyn Command> {
        Box::new(FakeQueueSubmit {
            queue_family: self.queue_family,
            submit_infos,
        })
    }
}
