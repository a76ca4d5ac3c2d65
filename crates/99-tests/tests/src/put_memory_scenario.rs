//! S5: a `PutMemory` request against a fictional pointer, passed through to
//! the authoritative state as a fresh allocation holding the little-endian
//! encoding of the slice value.

use pretty_assertions::assert_eq;

use memory_codec::{PodValue, Pointer, Value};
use replay_state::{GlobalState, APPLICATION_POOL};
use stream_controller::{run_stream, PutObject, StreamClient, StreamConfig, StreamRequest, StreamResult};
use testdata::Tick;

struct OneShotPutMemory {
    sent: bool,
    put: Option<PutObject>,
}

impl StreamClient for OneShotPutMemory {
    fn on_callback(&mut self, _command: capture_core::CommandId, _cmd_name: &str) {}

    fn next_request(&mut self) -> StreamResult<StreamRequest> {
        if !self.sent {
            self.sent = true;
            return Ok(StreamRequest::PutMemory {
                objects: vec![self.put.take().expect("one PutMemory object")],
            });
        }
        Ok(StreamRequest::PassCommand)
    }
}

#[test]
fn s5_fictional_pointer_gets_a_fresh_backing_allocation() {
    let (types, slice_idx) = testdata::u32_slice_registry();
    let capture = testdata::capture_with(types, type_registry::MemoryLayout::LP64_LE, vec![Box::new(Tick("X"))]);

    let config = StreamConfig {
        pass_default: true,
        command_names: vec![],
        include_initial_commands: false,
    };

    let mut state = GlobalState::new();
    let mut client = OneShotPutMemory {
        sent: false,
        put: Some(PutObject {
            pointer: Pointer::fictional(0),
            type_index: slice_idx,
            value: Value::Slice(vec![Value::Pod(PodValue::U32(10)), Value::Pod(PodValue::U32(20))]),
        }),
    };

    run_stream(&capture, &config, &mut state, &mut client).unwrap();

    let pool = state.pool(APPLICATION_POOL).unwrap();
    let ranges = pool.valid_ranges();
    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].size, 8);

    let bytes = pool.read(ranges[0].base, 8).unwrap();
    assert_eq!(bytes, vec![0x0a, 0x00, 0x00, 0x00, 0x14, 0x00, 0x00, 0x00]);
}
