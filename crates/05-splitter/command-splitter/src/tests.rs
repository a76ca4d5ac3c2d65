use pretty_assertions::assert_eq;

use capture_core::{
    Command, CommandBuilder, CommandId, MutateContext, QueueSubmit, SubCmdIdx, SubmitInfo,
};
use replay_state::{GlobalState, PoolObserver};
use type_registry::{MemoryLayout, TypeRegistry};

use crate::{CommandSplitter, SplitError};

struct DrawCall(u32);

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

struct Tick;

impl Command for Tick {
    fn cmd_name(&self) -> &str {
        "Tick"
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
        Box::new(Tick)
    }
}

struct FakeQueueSubmit {
    queue_family: u64,
    submit_infos: Vec<SubmitInfo>,
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

fn ctx_fixture() -> (TypeRegistry, MemoryLayout) {
    (TypeRegistry::new(), MemoryLayout::LP64_LE)
}

fn names(cmds: &[Box<dyn Command>]) -> Vec<&str> {
    cmds.iter().map(|c| c.cmd_name()).collect()
}

#[test]
fn commands_with_no_requests_pass_through_unchanged() {
    let (types, layout) = ctx_fixture();
    let ctx = MutateContext { types: &types, layout: &layout };
    let mut state = GlobalState::new();
    let mut splitter = CommandSplitter::new(|_| false);

    let out = splitter.transform(CommandId(0), &Tick, &ctx, &mut state).unwrap();

    assert_eq!(names(&out), vec!["Tick"]);
}

#[test]
fn whole_command_cut_emits_the_command_then_a_marker() {
    let (types, layout) = ctx_fixture();
    let ctx = MutateContext { types: &types, layout: &layout };
    let mut state = GlobalState::new();
    let mut splitter = CommandSplitter::new(|_| false);
    splitter.split(0, SubCmdIdx::root(5));

    let out = splitter.transform(CommandId(5), &Tick, &ctx, &mut state).unwrap();

    assert_eq!(names(&out), vec!["Tick", "CommandBufferInsertion"]);
}

#[test]
fn sub_command_cut_on_a_non_queue_submit_is_an_error() {
    let (types, layout) = ctx_fixture();
    let ctx = MutateContext { types: &types, layout: &layout };
    let mut state = GlobalState::new();
    let mut splitter = CommandSplitter::new(|_| false);
    splitter.split(0, SubCmdIdx::root(5).nested(0).nested(1));

    let err = splitter.transform(CommandId(5), &Tick, &ctx, &mut state).unwrap_err();
    assert!(matches!(err, SplitError::NotAQueueSubmit));
}

#[test]
fn within_submit_cut_replays_the_prefix_into_a_fresh_buffer() {
    let (types, layout) = ctx_fixture();
    let ctx = MutateContext { types: &types, layout: &layout };
    let mut state = GlobalState::new();
    let mut splitter = CommandSplitter::new(|_| false);

    let submit = FakeQueueSubmit {
        queue_family: 0,
        submit_infos: vec![SubmitInfo {
            command_buffer: 100,
            references: vec![
                Box::new(DrawCall(0)),
                Box::new(DrawCall(1)),
                Box::new(DrawCall(2)),
                Box::new(DrawCall(3)),
            ],
        }],
    };

    splitter.split(0, SubCmdIdx::root(5).nested(0).nested(2));
    let out = splitter.transform(CommandId(5), &submit, &ctx, &mut state).unwrap();

    assert_eq!(
        names(&out),
        vec![
            "VkCreateCommandPool",
            "VkAllocateCommandBuffers",
            "VkBeginCommandBuffer",
            "VkCmdDraw",
            "VkCmdDraw",
            "VkEndCommandBuffer",
            "VkQueueSubmit",
        ]
    );
}

#[test]
fn after_submit_cut_appends_a_trailing_submit_info_and_marker() {
    let (types, layout) = ctx_fixture();
    let ctx = MutateContext { types: &types, layout: &layout };
    let mut state = GlobalState::new();
    let mut splitter = CommandSplitter::new(|_| false);

    let submit = FakeQueueSubmit {
        queue_family: 0,
        submit_infos: vec![SubmitInfo {
            command_buffer: 100,
            references: vec![Box::new(DrawCall(0))],
        }],
    };

    splitter.split(0, SubCmdIdx::root(5).nested(0));
    let out = splitter.transform(CommandId(5), &submit, &ctx, &mut state).unwrap();

    assert_eq!(
        names(&out),
        vec![
            "VkCreateCommandPool",
            "VkAllocateCommandBuffers",
            "VkBeginCommandBuffer",
            "CommandBufferInsertion",
            "VkEndCommandBuffer",
            "VkQueueSubmit",
        ]
    );
}

#[test]
fn repeated_splits_reuse_the_same_lazily_created_pool() {
    let (types, layout) = ctx_fixture();
    let ctx = MutateContext { types: &types, layout: &layout };
    let mut state = GlobalState::new();
    let mut splitter = CommandSplitter::new(|_| false);

    let submit_a = FakeQueueSubmit {
        queue_family: 0,
        submit_infos: vec![SubmitInfo {
            command_buffer: 100,
            references: vec![Box::new(DrawCall(0)), Box::new(DrawCall(1))],
        }],
    };
    let submit_b = FakeQueueSubmit {
        queue_family: 0,
        submit_infos: vec![SubmitInfo {
            command_buffer: 200,
            references: vec![Box::new(DrawCall(0)), Box::new(DrawCall(1))],
        }],
    };

    splitter.split(0, SubCmdIdx::root(5).nested(0).nested(1));
    splitter.split(0, SubCmdIdx::root(9).nested(0).nested(1));

    let out_a = splitter.transform(CommandId(5), &submit_a, &ctx, &mut state).unwrap();
    let out_b = splitter.transform(CommandId(9), &submit_b, &ctx, &mut state).unwrap();

    let pool_creations = out_a
        .iter()
        .chain(out_b.iter())
        .filter(|c| c.cmd_name() == "VkCreateCommandPool")
        .count();
    assert_eq!(pool_creations, 1);
}
