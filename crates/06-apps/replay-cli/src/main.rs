//! Command-line utility for exercising the replay core's interactive
//! stream, memory resolver, and command splitter against a built-in demo
//! capture, printing one NDJSON report per line.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod demo;
mod render;

/// Drive the command-replay core against a built-in demo capture.
#[derive(Parser, Debug)]
#[command(author, version, about = "Interact with the replay core", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stream the "writes" demo capture, printing a report every time an
    /// interactive command stops for callback.
    Stream {
        /// Treat every command as interactive, not just the ones named by
        /// `--interactive`.
        #[arg(long, default_value_t = false)]
        pass_default: bool,
        /// Command names that stop for callback even when `--pass-default`
        /// is unset.
        #[arg(short, long = "interactive", value_name = "NAME")]
        interactive: Vec<String>,
        /// Drop every interactive command instead of passing it.
        #[arg(long, default_value_t = false)]
        drop: bool,
    },
    /// Resolve a memory window in the "writes" demo capture, after replaying
    /// its mutation prefix up to and including the given command.
    Resolve {
        /// Index of the last command to replay before resolving.
        #[arg(long, default_value_t = 0)]
        cmd_index: u64,
        /// Start address of the window to resolve.
        #[arg(long)]
        address: u64,
        /// Byte length of the window to resolve.
        #[arg(long)]
        size: u64,
        /// Include the typed ranges the resolved command observed.
        #[arg(long, default_value_t = false)]
        include_types: bool,
    },
    /// Split the "submit" demo capture's single `VkQueueSubmit`, cutting its
    /// one submit info after the given number of draw calls.
    Split {
        /// Number of leading draw calls to keep before the cut.
        #[arg(long)]
        cut_at: u64,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Stream {
            pass_default,
            interactive,
            drop,
        } => commands::stream(pass_default, interactive, drop),
        Command::Resolve {
            cmd_index,
            address,
            size,
            include_types,
        } => commands::resolve(cmd_index, address, size, include_types),
        Command::Split { cut_at } => commands::split(cut_at),
    }
}
