use capture_core::{Capture, Command, CommandId, MutateContext};
use memory_codec::{decode_memory, Decoder, Value};
use replay_state::{Arena, GlobalState, APPLICATION_POOL};
use type_registry::{MemoryLayout, TypeIndex, TypeRegistry};

use crate::client::StreamClient;
use crate::commit::commit;
use crate::config::StreamConfig;
use crate::error::{StreamError, StreamResult};
use crate::request::{PutObject, StreamRequest, StreamResponse, TypedRange};
use crate::store::ContentStore;

/// Replays `capture` command-by-command under `client`'s interactive
/// control, mutating `state` (the authoritative `GlobalState`) in place.
///
/// A command is interactive when [`StreamConfig::wants_callback`] matches
/// its name: the controller brings a single speculative `backup` state up
/// to that point (catching up whatever non-interactive commands it skipped
/// since the last interactive one), mutates the command into `backup` so
/// `ResolveObject`/`GetMemory` see consistent values, then runs the client's
/// request loop until `PassCommand` or `DropCommand`. Only on `PassCommand`
/// does the command (plus any `PutMemory` objects accumulated in the loop)
/// get committed into the authoritative `state`.
pub fn run_stream(
    capture: &Capture,
    config: &StreamConfig,
    state: &mut GlobalState,
    client: &mut dyn StreamClient,
) -> StreamResult<()> {
    let ctx = MutateContext {
        types: &capture.types,
        layout: &capture.layout,
    };

    let mut flat: Vec<&dyn Command> = Vec::new();
    if config.include_initial_commands {
        flat.extend(capture.initial_commands.iter().map(|c| c.as_ref()));
    }
    let initial_len = flat.len();
    flat.extend(capture.commands.iter().map(|c| c.as_ref()));

    let mut backup = Arena::fork(state);
    let mut backup_through = 0usize;
    let mut store = ContentStore::new();

    for (index, &cmd) in flat.iter().enumerate() {
        let id = CommandId(index as u64);

        if !config.wants_callback(cmd.cmd_name()) {
            cmd.mutate(&ctx, id, state, None, None)?;
        } else {
            while backup_through < index {
                let skipped = flat[backup_through];
                skipped.mutate(&ctx, CommandId(backup_through as u64), &mut backup, None, None)?;
                backup_through += 1;
            }
            cmd.mutate(&ctx, id, &mut backup, None, None)?;
            backup_through = index + 1;

            client.on_callback(id, cmd.cmd_name());

            let mut put_objects: Vec<PutObject> = Vec::new();
            let mut typed_ranges_cache: Option<Vec<TypedRange>> = None;

            let pass = loop {
                match client.next_request()? {
                    StreamRequest::PassCommand => break true,
                    StreamRequest::DropCommand => break false,
                    StreamRequest::PutMemory { objects } => put_objects.extend(objects),
                    StreamRequest::ResolveObject {
                        pointer,
                        type_index,
                        offset,
                    } => {
                        let value = resolve_object(
                            &mut backup,
                            capture.types.as_ref(),
                            &capture.layout,
                            pointer.address,
                            type_index,
                            offset,
                        )?;
                        client.on_response(StreamResponse::ReadObject { value });
                    }
                    StreamRequest::GetMemory => {
                        let ranges = typed_ranges_cache
                            .get_or_insert_with(|| dedup_typed_ranges(typed_ranges_of(cmd)))
                            .clone();
                        client.on_response(StreamResponse::TypedRanges { ranges });
                    }
                }
            };

            if pass {
                commit(
                    cmd,
                    id,
                    &ctx,
                    capture.types.as_ref(),
                    &capture.layout,
                    state,
                    &mut store,
                    put_objects,
                )?;
            }
        }

        if config.include_initial_commands && index + 1 == initial_len {
            client.on_initial_commands_done();
        }
    }

    Ok(())
}

fn resolve_object(
    backup: &mut GlobalState,
    types: &TypeRegistry,
    layout: &MemoryLayout,
    base: u64,
    type_index: TypeIndex,
    offset: u64,
) -> StreamResult<Value> {
    let pool = backup
        .pool(APPLICATION_POOL)
        .map_err(|_| StreamError::InvalidMemoryPool(APPLICATION_POOL))?;
    let ty = types.get_type(type_index)?;
    let elem_size = types.size_of(&ty, layout)?;
    let addr = base + elem_size * offset;
    let bytes = pool.read(addr, elem_size)?;
    let mut dec = Decoder::new(&bytes, *layout);
    Ok(decode_memory(&mut dec, types, elem_size, &ty)?)
}

fn typed_ranges_of(cmd: &dyn Command) -> Vec<TypedRange> {
    cmd.observations()
        .iter()
        .filter_map(|obs| {
            obs.type_index.map(|type_index| TypedRange {
                type_index,
                base: obs.base,
                size: obs.size,
                root: obs.base,
            })
        })
        .collect()
}

/// Sorts by `(type_index, base)` and merges adjacent/overlapping ranges that
/// share a type, mirroring the original's `TypedMemoryRanges.Filter`.
fn dedup_typed_ranges(mut ranges: Vec<TypedRange>) -> Vec<TypedRange> {
    ranges.sort_by_key(|r| (r.type_index, r.base));
    let mut out: Vec<TypedRange> = Vec::with_capacity(ranges.len());
    for r in ranges {
        if let Some(last) = out.last_mut() {
            if last.type_index == r.type_index && r.base <= last.base + last.size {
                let end = (last.base + last.size).max(r.base + r.size);
                last.size = end - last.base;
                continue;
            }
        }
        out.push(r);
    }
    out
}
