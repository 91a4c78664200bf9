//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for relay results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full transcripts, circle outputs, and the verdict
    Full,
    /// Only the judge's verdict
    Verdict,
    /// JSON output
    Json,
}

/// CLI arguments for circle-relay
#[derive(Parser, Debug)]
#[command(name = "circle-relay")]
#[command(author, version, about = "Telephone-chain relays of LLM agents, judged at the end")]
#[command(long_about = r#"
circle-relay runs several independent circles of LLM agents. Each circle
plays a multi-round game of telephone: within a round every agent answers in
turn, and the round's combined output becomes the next round's context. Once
every circle has settled, a judge agent reads each circle's final output and
delivers a verdict.

Circles and the judge are described by a setup: a JSON file you point at
with --setup-file, or a named setup saved in the store (see `setup --help`).

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./relay.toml        Project-level config
3. <config dir>/circle-relay/config.toml   Global config

Example:
  circle-relay --setup-file demo.json "Write the opening line of a story."
  circle-relay --setup story-circles --rounds 3 "Refine the pitch."
  circle-relay setup save story-circles --from demo.json
"#)]
pub struct Cli {
    /// The initial prompt fed to every circle (overrides the setup's prompt)
    pub prompt: Option<String>,

    /// Name of a saved setup to run
    #[arg(short, long, value_name = "NAME")]
    pub setup: Option<String>,

    /// Path to a setup JSON file to run
    #[arg(long, value_name = "PATH")]
    pub setup_file: Option<PathBuf>,

    /// Number of rounds per circle (overrides the setup's round count)
    #[arg(short, long, value_name = "N")]
    pub rounds: Option<u32>,

    /// Shared context attached to the very first turn of each circle
    #[arg(long, value_name = "TEXT")]
    pub shared_context: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress bars and live transcript
    #[arg(short, long)]
    pub quiet: bool,

    /// Stream every message to the console as it is produced
    #[arg(long)]
    pub live: bool,

    /// Write a JSONL transcript of the run to this path
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage saved setups
    Setup {
        #[command(subcommand)]
        action: SetupCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum SetupCommand {
    /// Save a setup file under a name
    Save {
        /// Name to save the setup as
        name: String,
        /// Path to the setup JSON file
        #[arg(long, value_name = "PATH")]
        from: PathBuf,
    },
    /// List saved setups
    List,
    /// Delete a saved setup
    Delete {
        /// Name of the setup to delete
        name: String,
    },
}
