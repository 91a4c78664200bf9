//! Presentation layer for circle-relay
//!
//! This crate contains CLI definitions, output formatters, and the console
//! observers that render a run's messages and progress.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat, SetupCommand};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ConsoleObserver, ProgressReporter};
