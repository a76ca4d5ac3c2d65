use replay_state::GlobalState;

use crate::command::{Command, CommandId, MutateContext};
use crate::error::CaptureResult;

/// Whether a failing `mutate` call aborts the whole run or is logged and
/// skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorMode {
    /// Propagate the first mutation error to the caller.
    Strict,
    /// Log the error and continue, preserving monotonic forward progress
    /// through the command list.
    LogAndContinue,
}

/// Replays `commands` against `state` in order, with no client interaction
/// (no pass/drop decisions, no builder, no watcher) — the trivial mutator
/// used to establish a capture's `initial_commands` prefix.
pub fn mutate_all(
    commands: &[Box<dyn Command>],
    ctx: &MutateContext,
    state: &mut GlobalState,
    mode: ErrorMode,
) -> CaptureResult<()> {
    for (index, cmd) in commands.iter().enumerate() {
        let id = CommandId(index as u64);
        if let Err(err) = cmd.mutate(ctx, id, state, None, None) {
            match mode {
                ErrorMode::Strict => return Err(err),
                ErrorMode::LogAndContinue => {
                    log::warn!(
                        "command {} ({}) failed to mutate: {err}; continuing",
                        id.0,
                        cmd.cmd_name()
                    );
                }
            }
        }
    }
    Ok(())
}
