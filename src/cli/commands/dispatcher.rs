//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`ConfigSource`] for loading the project's checklist configuration
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{CheckArgs, Cli, Commands};
use crate::config::{load_config, validate, PreflightConfig};
use crate::error::{PreflightError, Result};
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// Returns a [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Exit code used when no configuration could be found.
pub const EXIT_NO_CONFIG: i32 = 2;

/// Where a command reads its configuration from.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
}

impl ConfigSource {
    /// Discover layered config under `project_root`, or load only
    /// `config_override` when given.
    pub fn new(project_root: &Path, config_override: Option<&Path>) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Load and validate the configuration.
    ///
    /// A missing config is reported on `ui` and yields `None`; the caller
    /// should exit with [`EXIT_NO_CONFIG`].
    pub fn load(&self, ui: &mut dyn UserInterface) -> Result<Option<PreflightConfig>> {
        let config = match load_config(&self.project_root, self.config_override.as_deref()) {
            Ok(config) => config,
            Err(PreflightError::ConfigNotFound { path }) => {
                ui.error(&format!("No configuration found at {}", path.display()));
                ui.show_hint("Create .preflight/config.yml or pass --config <FILE>");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        validate(&config)?;
        Ok(Some(config))
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// With no subcommand, runs `check` with default arguments.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let source = ConfigSource::new(&self.project_root, cli.config.as_deref());

        match &cli.command {
            Some(Commands::Check(args)) => {
                let cmd = super::check::CheckCommand::new(source, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Probe(args)) => {
                let cmd = super::probe::ProbeComponentCommand::new(source, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::List(args)) => {
                let cmd = super::list::ListCommand::new(source, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                let cmd = super::check::CheckCommand::new(source, CheckArgs::default());
                cmd.execute(ui)
            }
        }
    }
}
