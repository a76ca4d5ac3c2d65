use sha2::{Digest, Sha256};
use smallvec::SmallVec;

use capture_core::{
    Command, CommandBuilder, CommandId, ContentId, MutateContext, Observation, QueueSubmit, SubCmdIdx, SubmitInfo,
};
use replay_state::{GlobalState, APPLICATION_POOL};

use crate::error::{SplitError, SplitResult};
use crate::lifecycle::{AllocateCommandBuffer, BeginCommandBuffer, CreateCommandPool, EndCommandBuffer, WithObservations};
use crate::marker::InsertionMarker;

#[derive(Default)]
struct RecordingBuilder(Vec<Box<dyn Command>>);

impl CommandBuilder for RecordingBuilder {
    fn insert_after(&mut self, cmd: Box<dyn Command>) {
        self.0.push(cmd);
    }
}

fn content_id_of(bytes: &[u8]) -> ContentId {
    ContentId(Sha256::digest(bytes).into())
}

/// Rewrites `VkQueueSubmit`-shaped commands so replay can stop at a
/// requested sub-command index, inserting synthetic commands into the
/// stream rather than rewriting the capture itself.
///
/// One splitter accumulates every `split` request up front, then transforms
/// the command list one command at a time via [`CommandSplitter::transform`]
/// — a command pool and per-submit command buffers are created lazily, on
/// first cut that actually needs them.
pub struct CommandSplitter {
    last_request: SubCmdIdx,
    requests: Vec<SubCmdIdx>,
    pool: Option<u64>,
    is_handle_used: Box<dyn Fn(u64) -> bool>,
    cmd_scope: Vec<Observation>,
}

impl CommandSplitter {
    /// `is_handle_used` probes whatever handle table the replayed state
    /// keeps for command pools and command buffers; the splitter never
    /// hands out a handle it reports as taken.
    pub fn new(is_handle_used: impl Fn(u64) -> bool + 'static) -> Self {
        CommandSplitter {
            last_request: SubCmdIdx::default(),
            requests: Vec::new(),
            pool: None,
            is_handle_used: Box::new(is_handle_used),
            cmd_scope: Vec::new(),
        }
    }

    /// Accumulates a request to ensure replay reaches `id`. `extra_commands`
    /// is a hint for how much the rewritten stream is expected to grow by;
    /// this splitter doesn't pre-size anything on it, but accepts it to
    /// match the control surface a caller driving several splitters at once
    /// would want to budget against.
    pub fn split(&mut self, _extra_commands: u64, id: SubCmdIdx) {
        if self.last_request < id {
            self.last_request = id.clone();
        }
        self.requests.push(id);
    }

    /// Transforms one command, returning the ordered replacement sequence
    /// to emit in its place (usually just the command itself, unchanged).
    pub fn transform(
        &mut self,
        id: CommandId,
        cmd: &dyn Command,
        ctx: &MutateContext,
        state: &mut GlobalState,
    ) -> SplitResult<Vec<Box<dyn Command>>> {
        let this_id = SubCmdIdx::root(id.0);
        let mut in_range = false;
        let mut top_cut: Option<SubCmdIdx> = None;
        let mut cuts: Vec<SubCmdIdx> = Vec::new();

        for r in &self.requests {
            if *r == this_id {
                in_range = true;
                top_cut = Some(r.clone());
            } else if r.is_nested_in(&this_id) {
                in_range = true;
                cuts.push(SubCmdIdx(SmallVec::from_slice(&r.0[1..])));
            }
        }

        let mut out = Vec::new();

        if !in_range {
            self.emit(&mut out, ctx, id, state, cmd.clone_command())?;
            return Ok(out);
        }

        if cuts.is_empty() {
            self.emit(&mut out, ctx, id, state, cmd.clone_command())?;
            self.emit_marker(
                &mut out,
                ctx,
                id,
                state,
                InsertionMarker {
                    command_buffer: 0,
                    idx: top_cut.expect("in_range with no sub-command cuts implies a whole-command cut"),
                    callee: cmd.clone_command(),
                },
            )?;
            return Ok(out);
        }

        let qs = cmd.as_queue_submit().ok_or(SplitError::NotAQueueSubmit)?;
        let rewritten = self.rewrite_queue_submit(id, qs, &cuts, ctx, state, &mut out)?;
        self.emit(&mut out, ctx, id, state, rewritten)?;

        if let Some(top) = top_cut {
            self.emit_marker(
                &mut out,
                ctx,
                id,
                state,
                InsertionMarker {
                    command_buffer: 0,
                    idx: top,
                    callee: cmd.clone_command(),
                },
            )?;
        }

        Ok(out)
    }

    /// No-op: every synthetic command this splitter needs is already emitted
    /// inline as each input command is transformed, unlike a transform that
    /// batches output and needs a terminal drain.
    pub fn flush(&mut self) {}

    fn rewrite_queue_submit(
        &mut self,
        id: CommandId,
        qs: &dyn QueueSubmit,
        cuts: &[SubCmdIdx],
        ctx: &MutateContext,
        state: &mut GlobalState,
        out: &mut Vec<Box<dyn Command>>,
    ) -> SplitResult<Box<dyn Command>> {
        let submit_infos = qs.submit_infos();
        let mut new_infos: Vec<SubmitInfo> = Vec::with_capacity(submit_infos.len());

        for (i, info) in submit_infos.iter().enumerate() {
            let mut within: Vec<usize> = Vec::new();
            let mut after = false;
            for cut in cuts {
                if cut.root_index() != Some(i as u64) {
                    continue;
                }
                if cut.depth() == 1 {
                    after = true;
                } else {
                    within.push(cut.0[1] as usize);
                }
            }

            let mut new_info = info.clone();
            if let Some(&cut_at) = within.iter().min() {
                let handle = self.split_command_buffer(qs.queue_family(), &info.references, cut_at, ctx, id, state, out)?;
                let prefix_len = cut_at.min(info.references.len());
                new_info = SubmitInfo {
                    command_buffer: handle,
                    references: info.references[..prefix_len].iter().map(|c| c.clone_command()).collect(),
                };
            }
            new_infos.push(new_info);

            if after {
                let marker_idx = SubCmdIdx::root(id.0).nested(i as u64);
                let trailing =
                    self.split_after_submit(qs.queue_family(), marker_idx, qs.clone_command(), ctx, id, state, out)?;
                new_infos.push(trailing);
            }
        }

        let blob: Vec<u8> = new_infos.iter().flat_map(|info| info.command_buffer.to_le_bytes()).collect();
        let base = state.allocate(APPLICATION_POOL, blob.len().max(1) as u64)?;
        state.write(APPLICATION_POOL, base, &blob)?;
        let submit_observation = Observation::read(APPLICATION_POOL, base, blob.len() as u64, content_id_of(&blob));

        let rewritten = qs.with_submit_infos(new_infos);
        let mut observations = rewritten.observations().to_vec();
        observations.push(submit_observation);

        Ok(Box::new(WithObservations {
            inner: rewritten,
            observations,
        }))
    }

    fn split_command_buffer(
        &mut self,
        queue_family: u64,
        references: &[Box<dyn Command>],
        cut_at: usize,
        ctx: &MutateContext,
        id: CommandId,
        state: &mut GlobalState,
        out: &mut Vec<Box<dyn Command>>,
    ) -> SplitResult<u64> {
        let handle = self.get_started_command_buffer(queue_family, ctx, id, state, out)?;
        for cmd in &references[..cut_at.min(references.len())] {
            self.emit(out, ctx, id, state, cmd.clone_command())?;
        }
        self.end_command_buffer(handle, ctx, id, state, out)?;
        Ok(handle)
    }

    fn split_after_submit(
        &mut self,
        queue_family: u64,
        idx: SubCmdIdx,
        callee: Box<dyn Command>,
        ctx: &MutateContext,
        id: CommandId,
        state: &mut GlobalState,
        out: &mut Vec<Box<dyn Command>>,
    ) -> SplitResult<SubmitInfo> {
        let handle = self.get_started_command_buffer(queue_family, ctx, id, state, out)?;
        self.emit_marker(
            out,
            ctx,
            id,
            state,
            InsertionMarker {
                command_buffer: 0,
                idx,
                callee,
            },
        )?;
        self.end_command_buffer(handle, ctx, id, state, out)?;
        Ok(SubmitInfo {
            command_buffer: handle,
            references: Vec::new(),
        })
    }

    fn get_command_pool(
        &mut self,
        queue_family: u64,
        ctx: &MutateContext,
        id: CommandId,
        state: &mut GlobalState,
        out: &mut Vec<Box<dyn Command>>,
    ) -> SplitResult<u64> {
        if let Some(pool) = self.pool {
            return Ok(pool);
        }
        let handle = crate::handle::fresh_handle(&*self.is_handle_used);
        self.record_cmd_scope_blob(state, handle)?;
        self.emit(out, ctx, id, state, Box::new(CreateCommandPool { handle, queue_family }))?;
        self.pool = Some(handle);
        Ok(handle)
    }

    fn get_started_command_buffer(
        &mut self,
        queue_family: u64,
        ctx: &MutateContext,
        id: CommandId,
        state: &mut GlobalState,
        out: &mut Vec<Box<dyn Command>>,
    ) -> SplitResult<u64> {
        let pool = self.get_command_pool(queue_family, ctx, id, state, out)?;
        let handle = crate::handle::fresh_handle(&*self.is_handle_used);

        self.record_cmd_scope_blob(state, handle)?;
        self.emit(out, ctx, id, state, Box::new(AllocateCommandBuffer { pool, handle }))?;

        self.record_cmd_scope_blob(state, handle)?;
        self.emit(out, ctx, id, state, Box::new(BeginCommandBuffer { handle }))?;

        Ok(handle)
    }

    fn end_command_buffer(
        &mut self,
        handle: u64,
        ctx: &MutateContext,
        id: CommandId,
        state: &mut GlobalState,
        out: &mut Vec<Box<dyn Command>>,
    ) -> SplitResult<()> {
        self.record_cmd_scope_blob(state, handle)?;
        self.emit(out, ctx, id, state, Box::new(EndCommandBuffer { handle }))
    }

    fn record_cmd_scope_blob(&mut self, state: &mut GlobalState, handle: u64) -> SplitResult<()> {
        let bytes = handle.to_le_bytes().to_vec();
        let base = state.allocate(APPLICATION_POOL, bytes.len() as u64)?;
        state.write(APPLICATION_POOL, base, &bytes)?;
        self.cmd_scope
            .push(Observation::read(APPLICATION_POOL, base, bytes.len() as u64, content_id_of(&bytes)));
        Ok(())
    }

    /// Mutates `cmd` (attaching whatever cmd-scope observations have
    /// accumulated since the last emission) and appends it, plus anything it
    /// self-scheduled via [`CommandBuilder::insert_after`], to `out`.
    fn emit(
        &mut self,
        out: &mut Vec<Box<dyn Command>>,
        ctx: &MutateContext,
        id: CommandId,
        state: &mut GlobalState,
        cmd: Box<dyn Command>,
    ) -> SplitResult<()> {
        let scoped: Box<dyn Command> = if self.cmd_scope.is_empty() {
            cmd
        } else {
            Box::new(WithObservations {
                inner: cmd,
                observations: std::mem::take(&mut self.cmd_scope),
            })
        };

        let mut builder = RecordingBuilder::default();
        scoped.mutate(ctx, id, state, Some(&mut builder), None)?;
        out.push(scoped);
        out.append(&mut builder.0);
        Ok(())
    }

    /// Mutates and appends an [`InsertionMarker`] directly, bypassing
    /// [`CommandSplitter::emit`]'s builder: the marker errors if it's ever
    /// handed one.
    fn emit_marker(
        &mut self,
        out: &mut Vec<Box<dyn Command>>,
        ctx: &MutateContext,
        id: CommandId,
        state: &mut GlobalState,
        marker: InsertionMarker,
    ) -> SplitResult<()> {
        marker.mutate(ctx, id, state, None, None)?;
        out.push(Box::new(marker));
        Ok(())
    }
}
