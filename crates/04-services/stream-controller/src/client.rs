use capture_core::CommandId;

use crate::error::StreamResult;
use crate::request::{StreamRequest, StreamResponse};

/// Everything the interactive loop needs from whatever is driving it (a CLI
/// prompt, a test harness, a wire adapter). Mirrors a request/response
/// exchange without committing to any transport, the same way
/// `transport_fabric::Service` separates a backend's submit/drain contract
/// from how commands and reports actually travel.
pub trait StreamClient {
    /// Delivers the command that just stopped for interactive control.
    fn on_callback(&mut self, command: CommandId, cmd_name: &str);

    /// Blocks for the client's next request. An `Err` aborts the stream —
    /// the controller's only cancellation point.
    fn next_request(&mut self) -> StreamResult<StreamRequest>;

    /// Delivers the response to a request that produces one (`ResolveObject`,
    /// `GetMemory`). Ignored by clients that never issue those requests.
    fn on_response(&mut self, _response: StreamResponse) {}

    /// Called once, after `Capture::initial_commands` finishes replaying.
    fn on_initial_commands_done(&mut self) {}
}
