//! Built-in demo captures. There is no on-disk capture format in this
//! workspace (captures arrive pre-parsed; persistence is upstream of every
//! crate here), so the CLI's "load a capture" step is picking one of these
//! rather than reading one from a file.

use std::sync::Arc;

use anyhow::Result;
use sha2::{Digest, Sha256};

use capture_core::{
    Capture, Command, CommandBuilder, CommandId, ContentId, MutateContext, Observation, QueueSubmit, SubmitInfo,
};
use memory_codec::{unbox_value, Encoder, PodValue, Value};
use replay_state::{GlobalState, PoolObserver, APPLICATION_POOL};
use type_registry::{MemoryLayout, PodKind, Type, TypeIndex, TypeRegistry};

fn content_id_of(bytes: &[u8]) -> ContentId {
    ContentId(Sha256::digest(bytes).into())
}

/// A command that performs no mutation, standing in for whatever framing
/// work (frame begin/end, pipeline barriers) a real capture has plenty of
/// between the commands a demo actually cares about.
#[derive(Clone)]
struct Tick(&'static str);

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

/// Writes one pre-encoded typed value into the application pool, carrying
/// the `Observation` a real argument-decoding command would report for it.
/// Encoding happens once at construction rather than on every `mutate` call.
#[derive(Clone)]
struct WriteTyped {
    name: &'static str,
    addr: u64,
    bytes: Vec<u8>,
    observation: Observation,
}

impl WriteTyped {
    fn new(
        name: &'static str,
        addr: u64,
        type_index: TypeIndex,
        value: &Value,
        types: &TypeRegistry,
        layout: &MemoryLayout,
    ) -> Result<Self> {
        let ty = types.get_type(type_index)?;
        let mut enc = Encoder::new(*layout);
        unbox_value(&mut enc, &mut |addr: u64| addr, types, &ty, value)?;
        let bytes = enc.into_bytes();
        let observation = Observation::write(APPLICATION_POOL, addr, bytes.len() as u64, content_id_of(&bytes))
            .with_type(type_index);
        Ok(WriteTyped {
            name,
            addr,
            bytes,
            observation,
        })
    }
}

impl Command for WriteTyped {
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
        std::slice::from_ref(&self.observation)
    }

    fn clone_command(&self) -> Box<dyn Command> {
        Box::new(self.clone())
    }
}

/// A `VkCmdDraw`-shaped sub-command, recorded as one of a submit's
/// `references`.
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

/// A `VkQueueSubmit`-shaped command carrying one pre-recorded submit info,
/// for the `split` subcommand to cut into.
struct Submit {
    queue_family: u64,
    submit_infos: Vec<SubmitInfo>,
}

impl Command for Submit {
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
        Box::new(Submit {
            queue_family: self.queue_family,
            submit_infos: self.submit_infos.clone(),
        })
    }

    fn as_queue_submit(&self) -> Option<&dyn QueueSubmit> {
        Some(self)
    }
}

impl QueueSubmit for Submit {
    fn queue_family(&self) -> u64 {
        self.queue_family
    }

    fn submit_infos(&self) -> &[SubmitInfo] {
        &self.submit_infos
    }

    fn with_submit_infos(&self, submit_infos: Vec<SubmitInfo>) -> Box<dyn Command> {
        Box::new(Submit {
            queue_family: self.queue_family,
            submit_infos,
        })
    }
}

/// Three commands around one interactive uniform update: `FrameBegin` and
/// `FrameEnd` are no-ops, `UpdateUniform` writes a `u32` at address 0 and is
/// the one `stream`/`resolve` care about.
pub fn writes_capture() -> Result<Capture> {
    let types = TypeRegistry::new();
    let u32_idx = TypeIndex(0);
    types.register(u32_idx, Type::Pod(PodKind::U32))?;
    let layout = MemoryLayout::LP64_LE;

    let update = WriteTyped::new(
        "UpdateUniform",
        0,
        u32_idx,
        &Value::Pod(PodValue::U32(0x2a)),
        &types,
        &layout,
    )?;

    let mut capture = Capture::new("replay-cli-demo", layout, Arc::new(types));
    capture.commands = vec![Box::new(Tick("FrameBegin")), Box::new(update), Box::new(Tick("FrameEnd"))];
    Ok(capture)
}

/// A single `VkQueueSubmit` recording four draw calls, for `split` to cut
/// into.
pub fn submit_capture() -> Result<Capture> {
    let types = TypeRegistry::new();
    let layout = MemoryLayout::LP64_LE;

    let submit = Submit {
        queue_family: 0,
        submit_infos: vec![SubmitInfo {
            command_buffer: 100,
            references: (0..4).map(|i| Box::new(DrawCall(i)) as Box<dyn Command>).collect(),
        }],
    };

    let mut capture = Capture::new("replay-cli-demo", layout, Arc::new(types));
    capture.commands = vec![Box::new(submit)];
    Ok(capture)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_capture_has_one_typed_observation() {
        let capture = writes_capture().unwrap();
        assert_eq!(capture.commands.len(), 3);
        assert_eq!(capture.commands[1].cmd_name(), "UpdateUniform");
        assert_eq!(capture.commands[1].observations().len(), 1);
    }

    #[test]
    fn submit_capture_carries_four_draw_calls() {
        let capture = submit_capture().unwrap();
        let qs = capture.commands[0].as_queue_submit().unwrap();
        assert_eq!(qs.submit_infos()[0].references.len(), 4);
    }
}
