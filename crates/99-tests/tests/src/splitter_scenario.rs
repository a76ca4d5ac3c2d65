//! S6: a within-submit cut two references deep into a four-reference
//! submit info rewrites the queue submit to point at a freshly recorded
//! command buffer replaying just the pre-cut prefix.

use pretty_assertions::assert_eq;

use capture_core::{Command, CommandId, MutateContext, SubCmdIdx, SubmitInfo};
use command_splitter::CommandSplitter;
use replay_state::GlobalState;
use testdata::{DrawCall, FakeQueueSubmit};
use type_registry::{MemoryLayout, TypeRegistry};

#[test]
fn s6_within_submit_cut_rewrites_the_submit_and_replays_the_prefix() {
    let types = TypeRegistry::new();
    let layout = MemoryLayout::LP64_LE;
    let ctx = MutateContext {
        types: &types,
        layout: &layout,
    };
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

    let names: Vec<&str> = out.iter().map(|c| c.cmd_name()).collect();
    assert_eq!(
        names,
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

    let rewritten: &Box<dyn Command> = out.last().unwrap();
    let qs = rewritten
        .as_queue_submit()
        .expect("rewritten command is still a queue submit");
    assert_eq!(qs.submit_infos().len(), 1);
    assert_ne!(
        qs.submit_infos()[0].command_buffer,
        100,
        "pSubmits now points at the freshly allocated command buffer"
    );
    assert_eq!(qs.submit_infos()[0].references.len(), 2);
}
