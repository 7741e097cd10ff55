//! List command implementation.
//!
//! The `preflight list` command shows the configured checklist without
//! running anything.

use serde_json::json;

use crate::checklist::DependencyChecker;
use crate::cli::args::ListArgs;
use crate::error::{PreflightError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ConfigSource, EXIT_NO_CONFIG};

/// The list command implementation.
pub struct ListCommand {
    source: ConfigSource,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(source: ConfigSource, args: ListArgs) -> Self {
        Self { source, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) = self.source.load(ui)? else {
            return Ok(CommandResult::failure(EXIT_NO_CONFIG));
        };

        let checker = DependencyChecker::from_config(&config)?;

        if self.args.json {
            let components: Vec<_> = checker
                .checklist()
                .iter()
                .map(|entry| json!({ "name": entry.name(), "command": entry.command() }))
                .collect();
            let value = json!({
                "components": components,
                "modules": checker.modules(),
                "interpreter": config.settings.python,
                "pipe_status": checker.pipe_status(),
            });
            let rendered =
                serde_json::to_string_pretty(&value).map_err(|e| PreflightError::Other(e.into()))?;
            ui.message(&rendered);
            return Ok(CommandResult::success());
        }

        ui.message("Components:");
        for entry in checker.checklist() {
            ui.show_component(entry.name(), &entry.command().to_string());
        }

        if !checker.modules().is_empty() {
            ui.message("");
            ui.message(&format!("Modules ({}):", config.settings.python));
            for module in checker.modules() {
                ui.message(&format!("  {}", module));
            }
        }

        Ok(CommandResult::success())
    }
}
