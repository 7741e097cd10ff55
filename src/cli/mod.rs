//! Command-line interface for preflight.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands, CompletionsArgs, ListArgs, ProbeArgs};
pub use commands::{Command, CommandDispatcher, CommandResult, ConfigSource};
