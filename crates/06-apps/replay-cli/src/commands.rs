//! One function per CLI subcommand, each driving a demo capture through the
//! real core crates and printing its NDJSON report(s) to stdout.

use anyhow::Result;
use capture_core::{CommandId, MutateContext, SubCmdIdx};
use command_splitter::CommandSplitter;
use memory_resolver::{resolve_memory, AfterPoint, MemoryPath};
use replay_state::{GlobalState, APPLICATION_POOL};
use stream_controller::{run_stream, StreamClient, StreamConfig, StreamRequest, StreamResult};

use crate::demo;
use crate::render::Report;

fn emit(report: Report) {
    print!("{}", report.to_ndjson_line().expect("report always serializes"));
}

/// Drives every `next_request` decision from one fixed policy (always pass,
/// or always drop whatever command stopped for callback), emitting a
/// `CommandStopped` report as each interactive command is reached.
struct AutoClient {
    drop_interactive: bool,
}

impl StreamClient for AutoClient {
    fn on_callback(&mut self, command: CommandId, cmd_name: &str) {
        emit(Report::CommandStopped {
            command: command.0,
            name: cmd_name.to_string(),
        });
    }

    fn next_request(&mut self) -> StreamResult<StreamRequest> {
        Ok(if self.drop_interactive {
            StreamRequest::DropCommand
        } else {
            StreamRequest::PassCommand
        })
    }
}

pub fn stream(pass_default: bool, interactive: Vec<String>, drop_interactive: bool) -> Result<()> {
    let capture = demo::writes_capture()?;
    let config = StreamConfig {
        pass_default,
        command_names: interactive,
        include_initial_commands: false,
    };

    log::info!("stream starting ({} commands)", capture.commands.len());
    let mut state = GlobalState::new();
    let mut client = AutoClient { drop_interactive };
    run_stream(&capture, &config, &mut state, &mut client)?;
    log::info!("stream done");

    emit(Report::StreamDone {
        commands_run: capture.commands.len() as u64,
    });
    Ok(())
}

pub fn resolve(cmd_index: u64, address: u64, size: u64, include_types: bool) -> Result<()> {
    let capture = demo::writes_capture()?;
    let mut state = GlobalState::new();

    let path = MemoryPath {
        after: AfterPoint {
            cmd_index,
            sub_indices: Default::default(),
        },
        pool: APPLICATION_POOL,
        address,
        size,
        type_index: None,
        offset: None,
        include_types,
        exclude_observed: false,
        exclude_data: false,
    };

    let response = resolve_memory(&capture, &mut state, &path)?;
    emit(Report::MemoryResolved {
        data: response.data.map(|bytes| hex::encode(bytes)),
        reads: response.reads.into_iter().map(Into::into).collect(),
        writes: response.writes.into_iter().map(Into::into).collect(),
        observed: response.observed.into_iter().map(Into::into).collect(),
        typed_ranges: response.typed_ranges.len(),
    });
    Ok(())
}

pub fn split(cut_at: u64) -> Result<()> {
    let capture = demo::submit_capture()?;
    let ctx = MutateContext {
        types: &capture.types,
        layout: &capture.layout,
    };
    let mut state = GlobalState::new();
    let mut splitter = CommandSplitter::new(|_| false);

    splitter.split(0, SubCmdIdx::root(0).nested(0).nested(cut_at));

    let out = splitter.transform(CommandId(0), capture.commands[0].as_ref(), &ctx, &mut state)?;
    for (index, cmd) in out.iter().enumerate() {
        emit(Report::SplitStep {
            index,
            name: cmd.cmd_name().to_string(),
        });
    }
    Ok(())
}
