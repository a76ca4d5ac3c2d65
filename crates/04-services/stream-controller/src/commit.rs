use std::collections::HashMap;

use capture_core::{Command, CommandBuilder, CommandId, MutateContext, Observation, SubCmdIdx};
use memory_codec::{encode_memory, unbox_value, Encoder, Value};
use replay_state::{GlobalState, PoolObserver, APPLICATION_POOL};
use type_registry::{MemoryLayout, Type, TypeRegistry};

use crate::error::StreamResult;
use crate::request::PutObject;
use crate::store::ContentStore;

/// Decorates a command with extra self-reported observations, synthesized
/// at commit time for memory a client supplied via `PutMemory` rather than
/// the command's own encoded arguments. `mutate` delegates straight through;
/// only `observations` differs from the wrapped command.
struct ObservedCommand {
    inner: Box<dyn Command>,
    observations: Vec<Observation>,
}

impl Command for ObservedCommand {
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

    fn sub_commands(&self) -> &[SubCmdIdx] {
        self.inner.sub_commands()
    }

    fn clone_command(&self) -> Box<dyn Command> {
        Box::new(ObservedCommand {
            inner: self.inner.clone_command(),
            observations: self.observations.clone(),
        })
    }
}

/// Commits an interactive command that accumulated `PutMemory` objects
/// during its request loop: allocates real storage for every fictional
/// pointer, encodes and writes each object's value into the authoritative
/// application pool, then mutates a clone of the command carrying the
/// synthesized read observations. `objects` is consumed and the accumulated
/// list is understood to be discarded by the caller afterward.
pub(crate) fn commit(
    cmd: &dyn Command,
    cmd_id: CommandId,
    ctx: &MutateContext,
    types: &TypeRegistry,
    layout: &MemoryLayout,
    state: &mut GlobalState,
    store: &mut ContentStore,
    objects: Vec<PutObject>,
) -> StreamResult<()> {
    if objects.is_empty() {
        cmd.mutate(ctx, cmd_id, state, None, None)?;
        return Ok(());
    }

    let mut resolved: HashMap<u64, u64> = HashMap::new();
    for obj in &objects {
        if obj.pointer.fictional && !resolved.contains_key(&obj.pointer.address) {
            let ty = types.get_type(obj.type_index)?;
            let (elem_size, count) = match &ty {
                Type::Slice(underlying) => {
                    let elem_ty = types.get_type(*underlying)?;
                    let count = match &obj.value {
                        Value::Slice(entries) => entries.len() as u64,
                        _ => 1,
                    };
                    (types.size_of(&elem_ty, layout)?, count)
                }
                _ => (types.size_of(&ty, layout)?, 1),
            };
            let base = state.allocate(APPLICATION_POOL, elem_size * count.max(1))?;
            resolved.insert(obj.pointer.address, base);
        }
    }

    let mut synthesized = Vec::with_capacity(objects.len());
    for obj in &objects {
        let ty = types.get_type(obj.type_index)?;
        let base = if obj.pointer.fictional {
            resolved[&obj.pointer.address]
        } else {
            obj.pointer.address
        };

        let mut enc = Encoder::new(*layout);
        let mut resolver = |addr: u64| resolved.get(&addr).copied().unwrap_or(addr);
        if let Type::Slice(_) = &ty {
            encode_memory(&mut enc, &mut resolver, types, &ty, &obj.value)?;
        } else {
            unbox_value(&mut enc, &mut resolver, types, &ty, &obj.value)?;
        }
        let bytes = enc.into_bytes();
        let size = bytes.len() as u64;

        state.write(APPLICATION_POOL, base, &bytes)?;
        let content_id = store.insert(bytes);
        synthesized.push(Observation::read(APPLICATION_POOL, base, size, content_id).with_type(obj.type_index));
    }

    let observed = ObservedCommand {
        observations: {
            let mut all = cmd.observations().to_vec();
            all.extend(synthesized);
            all
        },
        inner: cmd.clone_command(),
    };

    observed.mutate(ctx, cmd_id, state, None, None)?;
    Ok(())
}
