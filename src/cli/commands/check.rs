//! Check command implementation.
//!
//! The `preflight check` command probes every component, imports every
//! module, and fails with the aggregate error when anything is missing.

use serde::Serialize;

use crate::checklist::{CheckEvent, CheckReport, DependencyChecker, ModuleStatus, ProbeOutcome};
use crate::cli::args::CheckArgs;
use crate::error::{PreflightError, Result};
use crate::ui::{module_message, probe_message, SpinnerHandle, UserInterface};

use super::dispatcher::{Command, CommandResult, ConfigSource, EXIT_NO_CONFIG};

/// JSON shape of a check report.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    satisfied: bool,
    #[serde(flatten)]
    report: &'a CheckReport,
}

/// The check command implementation.
pub struct CheckCommand {
    source: ConfigSource,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(source: ConfigSource, args: CheckArgs) -> Self {
        Self { source, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    fn run_json(
        &self,
        checker: &DependencyChecker,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let report = checker.scan()?;
        let satisfied = report.is_satisfied();

        let json = serde_json::to_string_pretty(&JsonReport {
            satisfied,
            report: &report,
        })
        .map_err(|e| PreflightError::Other(e.into()))?;
        ui.message(&json);

        if satisfied {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }

    fn run_with_progress(
        &self,
        checker: &DependencyChecker,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        if checker.checklist().is_empty() && checker.modules().is_empty() {
            ui.warning("Nothing to check: no components or modules configured");
            return Ok(CommandResult::success());
        }

        let verbose = ui.output_mode().shows_details();
        let mut spinner: Option<Box<dyn SpinnerHandle>> = None;

        let scanned = checker.scan_with(|event| match event {
            CheckEvent::ProbeStarted { component } => {
                let mut message = probe_message(component);
                if verbose {
                    if let Some(command) = checker.checklist().get(component) {
                        message = format!("{} [{}]", message, command);
                    }
                }
                spinner = Some(ui.start_spinner(&message));
            }
            CheckEvent::ProbeFinished { component, outcome } => {
                if let Some(mut handle) = spinner.take() {
                    match outcome {
                        ProbeOutcome::Installed => handle.finish_success(component),
                        ProbeOutcome::ExecutableNotFound { program } => handle.finish_error(
                            &format!("{} not installed ({} not found)", component, program),
                        ),
                    }
                }
            }
            CheckEvent::ModuleChecked { module, status } => {
                let mut handle = ui.start_spinner(&module_message(module));
                match status {
                    ModuleStatus::Found => handle.finish_success(module),
                    ModuleStatus::NotFound => {
                        handle.finish_error(&format!("{} cannot be imported", module))
                    }
                }
            }
        });

        // A probe that failed outright leaves its spinner running.
        if let Some(mut handle) = spinner.take() {
            handle.finish_error("probe failed");
        }

        let report = scanned?;
        if report.is_satisfied() {
            ui.success("All dependencies installed");
        }
        report.into_result()?;

        Ok(CommandResult::success())
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) = self.source.load(ui)? else {
            return Ok(CommandResult::failure(EXIT_NO_CONFIG));
        };

        let checker = DependencyChecker::from_config(&config)?;

        if self.args.json {
            return self.run_json(&checker, ui);
        }

        ui.show_header(config.app_name.as_deref().unwrap_or("preflight"));
        self.run_with_progress(&checker, ui)
    }
}
