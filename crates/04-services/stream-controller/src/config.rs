/// Client-chosen parameters for one stream run: which commands should stop
/// for interactive control, and whether the capture's reconstructed
/// pre-trace state should be replayed first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamConfig {
    /// If `true`, every command is interactive (`command_names` is then
    /// only an allowlist the client never actually needs).
    pub pass_default: bool,
    /// Names (per [`capture_core::Command::cmd_name`]) that are interactive
    /// even when `pass_default` is `false`.
    pub command_names: Vec<String>,
    /// Whether to replay `Capture::initial_commands` before the capture's
    /// own commands, emitting `InitialCommandsDone` once they finish.
    pub include_initial_commands: bool,
}

impl StreamConfig {
    pub(crate) fn wants_callback(&self, cmd_name: &str) -> bool {
        self.pass_default || self.command_names.iter().any(|name| name == cmd_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_default_overrides_an_empty_allowlist() {
        let cfg = StreamConfig {
            pass_default: true,
            ..Default::default()
        };
        assert!(cfg.wants_callback("AnythingAtAll"));
    }

    #[test]
    fn allowlist_matches_by_name_only() {
        let cfg = StreamConfig {
            pass_default: false,
            command_names: vec!["X".to_string()],
            include_initial_commands: false,
        };
        assert!(cfg.wants_callback("X"));
        assert!(!cfg.wants_callback("Y"));
    }
}
