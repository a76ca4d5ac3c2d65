//! Interactive, per-command replay: walks a capture's commands in order,
//! stopping for client control on the ones it asks for, and committing each
//! one's effects (plus anything the client wrote via `PutMemory`) only once
//! the client says to pass it.

mod client;
mod commit;
mod config;
mod controller;
mod error;
mod request;
mod store;

pub use client::StreamClient;
pub use config::StreamConfig;
pub use controller::run_stream;
pub use error::{StreamError, StreamResult};
pub use request::{PutObject, StreamRequest, StreamResponse, TypedRange};
pub use store::ContentStore;
