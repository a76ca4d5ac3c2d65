use std::sync::Arc;

use type_registry::{MemoryLayout, TypeRegistry};

use crate::command::Command;

/// A capture as it arrives at the replay core: already parsed, never
/// persisted here (persistence is the capture store's concern, upstream of
/// this crate).
pub struct Capture {
    pub device: String,
    pub layout: MemoryLayout,
    pub types: Arc<TypeRegistry>,
    pub commands: Vec<Box<dyn Command>>,
    /// Commands to run once, before the interactive stream begins, to bring
    /// `GlobalState` to the point the capture was taken from (e.g. the
    /// surface/device setup a trace doesn't itself record).
    pub initial_commands: Vec<Box<dyn Command>>,
}

impl Capture {
    pub fn new(device: impl Into<String>, layout: MemoryLayout, types: Arc<TypeRegistry>) -> Self {
        Capture {
            device: device.into(),
            layout,
            types,
            commands: Vec::new(),
            initial_commands: Vec::new(),
        }
    }
}
