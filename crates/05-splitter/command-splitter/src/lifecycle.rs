use capture_core::{Command, CommandBuilder, CommandId, MutateContext, Observation};
use replay_state::{GlobalState, PoolObserver};

/// Creates the command pool the splitter lazily allocates on first demand,
/// scoped to `queue_family`.
pub struct CreateCommandPool {
    pub handle: u64,
    pub queue_family: u64,
}

impl Command for CreateCommandPool {
    fn cmd_name(&self) -> &str {
        "VkCreateCommandPool"
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
        Box::new(CreateCommandPool {
            handle: self.handle,
            queue_family: self.queue_family,
        })
    }
}

pub struct AllocateCommandBuffer {
    pub pool: u64,
    pub handle: u64,
}

impl Command for AllocateCommandBuffer {
    fn cmd_name(&self) -> &str {
        "VkAllocateCommandBuffers"
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
        Box::new(AllocateCommandBuffer {
            pool: self.pool,
            handle: self.handle,
        })
    }
}

pub struct BeginCommandBuffer {
    pub handle: u64,
}

impl Command for BeginCommandBuffer {
    fn cmd_name(&self) -> &str {
        "VkBeginCommandBuffer"
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
        Box::new(BeginCommandBuffer { handle: self.handle })
    }
}

pub struct EndCommandBuffer {
    pub handle: u64,
}

impl Command for EndCommandBuffer {
    fn cmd_name(&self) -> &str {
        "VkEndCommandBuffer"
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
        Box::new(EndCommandBuffer { handle: self.handle })
    }
}

/// Decorates a synthesized lifecycle or submit command with the read
/// observations its marshaled argument blobs picked up — the "cmd scope" /
/// "submit scope" allocation bookkeeping of the splitter's closing
/// invariant, flushed onto the command it was recorded against rather than
/// carried as separate state.
pub(crate) struct WithObservations {
    pub(crate) inner: Box<dyn Command>,
    pub(crate) observations: Vec<Observation>,
}

impl Command for WithObservations {
    fn cmd_name(&self) -> &str {
        self.inner.cmd_name()
    }

    fn mutate(
        &self,
        ctx: &MutateContext,
        id: CommandId,
        state: &mut GlobalState,
        builder: Option<&mut dyn CommandBuilder>,
        watcher: Option<&mut dyn PoolObserver>,
    ) -> capture_core::CaptureResult<()> {
        self.inner.mutate(ctx, id, state, builder, watcher)
    }

    fn observations(&self) -> &[Observation] {
        &self.observations
    }

    fn clone_command(&self) -> Box<dyn Command> {
        Box::new(WithObservations {
            inner: self.inner.clone_command(),
            observations: self.observations.clone(),
        })
    }
}
