//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// preflight - Verify system dependencies before a pipeline runs.
#[derive(Debug, Parser)]
#[command(name = "preflight")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .preflight/config.yml)
    #[arg(short, long, global = true, env = "PREFLIGHT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check every component and module (default if no command specified)
    Check(CheckArgs),

    /// Probe a single component
    Probe(ProbeArgs),

    /// List the configured checklist
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `probe` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ProbeArgs {
    /// Component name from the checklist
    pub component: String,

    /// Output the outcome as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["preflight"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn check_json_flag_parses() {
        let cli = Cli::try_parse_from(["preflight", "check", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Check(args)) => assert!(args.json),
            other => panic!("Expected Check, got {:?}", other),
        }
    }

    #[test]
    fn probe_requires_component() {
        assert!(Cli::try_parse_from(["preflight", "probe"]).is_err());

        let cli = Cli::try_parse_from(["preflight", "probe", "cuda"]).unwrap();
        match cli.command {
            Some(Commands::Probe(args)) => {
                assert_eq!(args.component, "cuda");
                assert!(!args.json);
            }
            other => panic!("Expected Probe, got {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["preflight", "list", "--config", "custom.yml", "-v"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.yml")));
        assert!(cli.verbose);
    }

    #[test]
    fn completions_parses_shell() {
        let cli = Cli::try_parse_from(["preflight", "completions", "bash"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Completions(CompletionsArgs { shell: Shell::Bash }))
        ));
    }
}
