//! Shared fixtures for the cross-crate scenario tests in
//! `crates/99-tests/tests`: type registries, reusable command
//! implementations, and `Capture` builders, so each scenario wires up only
//! the commands and requests it actually exercises.

mod commands;
mod registries;

pub use commands::{DrawCall, FakeQueueSubmit, RecordedWrite, Tick};
pub use registries::{s1_struct_registry, s2_array_registry, u32_slice_registry};

use std::sync::Arc;

use capture_core::{Capture, Command};
use once_cell::sync::Lazy;
use type_registry::{MemoryLayout, TypeIndex, TypeRegistry};

/// Built once and shared by any scenario that just needs *a* registered
/// struct type and doesn't care which index it lives at.
pub static SHARED_STRUCT_TYPES: Lazy<(Arc<TypeRegistry>, TypeIndex)> = Lazy::new(|| {
    let (reg, idx) = s1_struct_registry();
    (Arc::new(reg), idx)
});

/// Assembles a [`Capture`] from already-built commands under `LP64_LE` and
/// an empty type registry, for scenarios whose commands don't decode typed
/// memory at all.
pub fn capture(commands: Vec<Box<dyn Command>>) -> Capture {
    capture_with(TypeRegistry::new(), MemoryLayout::LP64_LE, commands)
}

/// Assembles a [`Capture`] from `types`, `layout`, and `commands`, leaving
/// `initial_commands` empty.
pub fn capture_with(types: TypeRegistry, layout: MemoryLayout, commands: Vec<Box<dyn Command>>) -> Capture {
    let mut cap = Capture::new("testdata", layout, Arc::new(types));
    cap.commands = commands;
    cap
}
