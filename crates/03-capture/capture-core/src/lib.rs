//! The `Command`/`Capture` contract and the trivial command mutator: the
//! replay core's view of a capture, independent of any particular graphics
//! API's command set.

mod capture;
mod command;
mod error;
mod mutator;
mod observation;
mod sub_cmd_idx;

pub use capture::Capture;
pub use command::{Command, CommandBuilder, CommandId, MutateContext, QueueSubmit, SubmitInfo};
pub use error::{CaptureError, CaptureResult};
pub use mutator::{mutate_all, ErrorMode};
pub use observation::{ContentId, Observation, ObservationKind};
pub use sub_cmd_idx::SubCmdIdx;
