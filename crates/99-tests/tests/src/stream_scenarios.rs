//! S3/S4: a three-command capture streamed with one interactive command,
//! passed in one run and dropped in the other, each checked against a
//! direct non-streamed `mutate_all` over the equivalent command list.

use pretty_assertions::assert_eq;

use capture_core::{mutate_all, Command, CommandId, ErrorMode, MutateContext};
use replay_state::{GlobalState, APPLICATION_POOL};
use stream_controller::{run_stream, StreamClient, StreamConfig, StreamRequest, StreamResult};
use testdata::RecordedWrite;

struct ScriptedClient {
    pass: bool,
    callbacks: Vec<(CommandId, String)>,
}

impl ScriptedClient {
    fn new(pass: bool) -> Self {
        ScriptedClient {
            pass,
            callbacks: Vec::new(),
        }
    }
}

impl StreamClient for ScriptedClient {
    fn on_callback(&mut self, command: CommandId, cmd_name: &str) {
        self.callbacks.push((command, cmd_name.to_string()));
    }

    fn next_request(&mut self) -> StreamResult<StreamRequest> {
        Ok(if self.pass {
            StreamRequest::PassCommand
        } else {
            StreamRequest::DropCommand
        })
    }
}

fn abx_commands() -> Vec<Box<dyn Command>> {
    vec![
        Box::new(RecordedWrite::new("A", 0, [0xAA])),
        Box::new(RecordedWrite::new("X", 8, [0xCC])),
        Box::new(RecordedWrite::new("B", 16, [0xBB])),
    ]
}

fn config_for_x() -> StreamConfig {
    StreamConfig {
        pass_default: false,
        command_names: vec!["X".to_string()],
        include_initial_commands: false,
    }
}

fn snapshot(state: &GlobalState) -> Vec<u8> {
    state.pool(APPLICATION_POOL).unwrap().read_filled(0, 24)
}

#[test]
fn s3_passing_the_interactive_command_matches_full_mutation() {
    let capture = testdata::capture(abx_commands());
    let config = config_for_x();

    let mut streamed = GlobalState::new();
    let mut client = ScriptedClient::new(true);
    run_stream(&capture, &config, &mut streamed, &mut client).unwrap();

    assert_eq!(client.callbacks, vec![(CommandId(1), "X".to_string())]);

    let ctx = MutateContext {
        types: &capture.types,
        layout: &capture.layout,
    };
    let mut direct = GlobalState::new();
    mutate_all(&capture.commands, &ctx, &mut direct, ErrorMode::Strict).unwrap();

    assert_eq!(snapshot(&streamed), snapshot(&direct));
}

#[test]
fn s4_dropping_the_interactive_command_matches_mutation_without_it() {
    let capture = testdata::capture(abx_commands());
    let config = config_for_x();

    let mut streamed = GlobalState::new();
    let mut client = ScriptedClient::new(false);
    run_stream(&capture, &config, &mut streamed, &mut client).unwrap();

    assert!(!streamed.pool(APPLICATION_POOL).unwrap().is_mapped(8, 1));

    let ctx = MutateContext {
        types: &capture.types,
        layout: &capture.layout,
    };
    let without_x = testdata::capture(vec![
        Box::new(RecordedWrite::new("A", 0, [0xAA])),
        Box::new(RecordedWrite::new("B", 16, [0xBB])),
    ]);
    let mut direct = GlobalState::new();
    mutate_all(&without_x.commands, &ctx, &mut direct, ErrorMode::Strict).unwrap();

    assert_eq!(snapshot(&streamed), snapshot(&direct));
}
