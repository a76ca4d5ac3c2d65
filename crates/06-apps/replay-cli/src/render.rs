//! NDJSON report shapes the CLI's subcommands print, one per line.

use serde::Serialize;

use replay_state::Range;

#[derive(Clone, Debug, Serialize)]
pub struct RangeView {
    pub base: u64,
    pub size: u64,
}

impl From<Range> for RangeView {
    fn from(r: Range) -> Self {
        RangeView { base: r.base, size: r.size }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "kind")]
pub enum Report {
    /// An interactive command stopped for callback.
    CommandStopped { command: u64, name: String },
    /// The stream finished; `commands_run` counts every command replayed,
    /// interactive or not.
    StreamDone { commands_run: u64 },
    /// The response to a `resolve` invocation.
    MemoryResolved {
        data: Option<String>,
        reads: Vec<RangeView>,
        writes: Vec<RangeView>,
        observed: Vec<RangeView>,
        typed_ranges: usize,
    },
    /// One command in the splitter's rewritten output sequence.
    SplitStep { index: usize, name: String },
}

impl Report {
    pub fn to_ndjson_line(&self) -> serde_json::Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_ndjson_line_ends_with_newline() {
        let report = Report::StreamDone { commands_run: 3 };
        let line = report.to_ndjson_line().unwrap();
        assert!(line.ends_with('\n'));
        assert!(line.contains("\"kind\":\"StreamDone\""));
    }

    #[test]
    fn range_view_carries_base_and_size() {
        let view: RangeView = Range { base: 4, size: 8 }.into();
        assert_eq!(view.base, 4);
        assert_eq!(view.size, 8);
    }
}
