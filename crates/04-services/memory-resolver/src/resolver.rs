use capture_core::{mutate_all, Capture, CommandId, ErrorMode, MutateContext};
use memory_codec::{decode_memory, Decoder, Value};
use replay_state::{GlobalState, PoolId, PoolObserver, Range};
use type_registry::Type;

use crate::error::{ResolveError, ResolveResult};
use crate::path::MemoryPath;
use crate::range_merge::merge;
use crate::response::{MemoryResponse, TypedRange};

/// Collects the read/write ranges a single command's mutation touches in the
/// target pool, overlapping the requested window. Installed as the `watcher`
/// for exactly one `mutate` call, mirroring the original resolver's
/// `SetOnCreate`-installed `OnRead`/`OnWrite` hooks.
struct RangeCollector {
    target: PoolId,
    window: Range,
    reads: Vec<Range>,
    writes: Vec<Range>,
}

impl RangeCollector {
    fn new(target: PoolId, window: Range) -> Self {
        RangeCollector {
            target,
            window,
            reads: Vec::new(),
            writes: Vec::new(),
        }
    }

    fn record(list: &mut Vec<Range>, window: Range, addr: u64, len: u64) {
        let touched = Range { base: addr, size: len };
        if let Some(overlap) = touched.intersect(&window) {
            merge(list, overlap);
        }
    }
}

impl PoolObserver for RangeCollector {
    fn on_read(&mut self, pool: PoolId, addr: u64, len: u64) {
        if pool == self.target {
            Self::record(&mut self.reads, self.window, addr, len);
        }
    }

    fn on_write(&mut self, pool: PoolId, addr: u64, len: u64) {
        if pool == self.target {
            Self::record(&mut self.writes, self.window, addr, len);
        }
    }
}

fn validate_index(capture: &Capture, cmd_index: u64) -> ResolveResult<()> {
    let len = capture.commands.len() as u64;
    if cmd_index >= len {
        return Err(ResolveError::PathOutOfBounds { index: cmd_index, len });
    }
    Ok(())
}

/// Resolves a raw memory path (§4.4's non-`MemoryAsType` branch): replays
/// the mutation prefix up to and including `path.after.cmd_index`, records
/// the final command's reads/writes against the requested window, and
/// returns whatever of the window is currently mapped.
pub fn resolve_memory(
    capture: &Capture,
    state: &mut GlobalState,
    path: &MemoryPath,
) -> ResolveResult<MemoryResponse> {
    validate_index(capture, path.after.cmd_index)?;
    let cmd_index = path.after.cmd_index as usize;

    let ctx = MutateContext {
        types: &capture.types,
        layout: &capture.layout,
    };

    mutate_all(&capture.commands[..cmd_index], &ctx, state, ErrorMode::Strict)
        .map_err(ResolveError::Mutation)?;

    let window = Range {
        base: path.address,
        size: path.size,
    };
    let mut collector = RangeCollector::new(path.pool, window);
    let last = &capture.commands[cmd_index];
    last.mutate(&ctx, CommandId(cmd_index as u64), state, None, Some(&mut collector))?;

    let pool = state
        .pool(path.pool)
        .map_err(|_| ResolveError::InvalidMemoryPool(path.pool))?;

    let observed = if path.exclude_observed {
        Vec::new()
    } else {
        pool.valid_ranges()
            .into_iter()
            .filter_map(|r| r.intersect(&window))
            .collect()
    };

    let data = if !path.exclude_data && path.size > 0 {
        Some(pool.read_filled(path.address, path.size))
    } else {
        None
    };

    let typed_ranges = if path.include_types {
        last.observations()
            .iter()
            .filter(|obs| obs.pool == path.pool && obs.type_index.is_some())
            .filter_map(|obs| {
                let obs_range = Range {
                    base: obs.base,
                    size: obs.size,
                };
                obs_range.intersect(&window).map(|overlap| TypedRange {
                    type_index: obs.type_index.unwrap(),
                    base: overlap.base,
                    size: overlap.size,
                    root: obs.base,
                })
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(MemoryResponse {
        data,
        reads: collector.reads,
        writes: collector.writes,
        observed,
        typed_ranges,
    })
}

/// Resolves `§4.4`'s `MemoryAsType` branch: replays the mutation prefix
/// through and including `path.after.cmd_index`, then decodes the requested
/// window directly as `ty` (a zero `path.size` means "decode to the end of
/// the addressable range", matching the original's `0xFFFFFFFFFFFFFFFF`
/// sentinel).
pub fn resolve_memory_as_type(
    capture: &Capture,
    state: &mut GlobalState,
    path: &MemoryPath,
    ty: &Type,
) -> ResolveResult<Value> {
    validate_index(capture, path.after.cmd_index)?;
    let cmd_index = path.after.cmd_index as usize;

    let ctx = MutateContext {
        types: &capture.types,
        layout: &capture.layout,
    };

    mutate_all(
        &capture.commands[..=cmd_index],
        &ctx,
        state,
        ErrorMode::Strict,
    )
    .map_err(ResolveError::Mutation)?;

    let pool = state
        .pool(path.pool)
        .map_err(|_| ResolveError::InvalidMemoryPool(path.pool))?;

    let size = if path.size == 0 { u64::MAX } else { path.size };
    let available = pool
        .valid_ranges()
        .into_iter()
        .filter(|r| r.base >= path.address)
        .map(|r| r.end() - path.address)
        .max()
        .unwrap_or(0)
        .min(size);

    let bytes = pool.read_filled(path.address, available);
    let mut dec = Decoder::new(&bytes, capture.layout);
    Ok(decode_memory(&mut dec, &capture.types, path.size, ty)?)
}
