//! Probe command implementation.
//!
//! The `preflight probe <COMPONENT>` command runs one component's probe.

use serde_json::json;

use crate::checklist::{DependencyChecker, ProbeOutcome};
use crate::cli::args::ProbeArgs;
use crate::error::{PreflightError, Result};
use crate::ui::{probe_message, UserInterface};

use super::dispatcher::{Command, CommandResult, ConfigSource, EXIT_NO_CONFIG};

/// The probe command implementation.
pub struct ProbeComponentCommand {
    source: ConfigSource,
    args: ProbeArgs,
}

impl ProbeComponentCommand {
    /// Create a new probe command.
    pub fn new(source: ConfigSource, args: ProbeArgs) -> Self {
        Self { source, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ProbeArgs {
        &self.args
    }
}

impl Command for ProbeComponentCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(config) = self.source.load(ui)? else {
            return Ok(CommandResult::failure(EXIT_NO_CONFIG));
        };

        let checker = DependencyChecker::from_config(&config)?;
        let component = self.args.component.as_str();

        let outcome = if self.args.json {
            checker.probe_outcome(component)?
        } else {
            let mut spinner = ui.start_spinner(&probe_message(component));
            match checker.probe_outcome(component) {
                Ok(outcome) => {
                    match &outcome {
                        ProbeOutcome::Installed => spinner.finish_success(component),
                        ProbeOutcome::ExecutableNotFound { program } => spinner.finish_error(
                            &format!("{} not installed ({} not found)", component, program),
                        ),
                    }
                    outcome
                }
                Err(e) => {
                    spinner.finish_error(&format!("{} could not be probed", component));
                    return Err(e);
                }
            }
        };

        if self.args.json {
            let value = json!({
                "component": component,
                "installed": !outcome.is_missing(),
                "outcome": outcome,
            });
            let rendered =
                serde_json::to_string_pretty(&value).map_err(|e| PreflightError::Other(e.into()))?;
            ui.message(&rendered);
        }

        if outcome.is_missing() {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::ui::{MockUI, SpinnerStatus};
    use std::fs;
    use tempfile::TempDir;

    const MISSING: &str = "preflight-test-definitely-missing-binary";

    fn setup() -> (TempDir, ConfigSource) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(
            &path,
            format!(
                "components:\n  toolA: [\"true\"]\n  toolB: [{}, --version]\n",
                MISSING
            ),
        )
        .unwrap();
        let source = ConfigSource::new(temp.path(), Some(&path));
        (temp, source)
    }

    fn args(component: &str, json: bool) -> ProbeArgs {
        ProbeArgs {
            component: component.to_string(),
            json,
        }
    }

    #[test]
    fn installed_component_succeeds() {
        let (_temp, source) = setup();
        let mut ui = MockUI::new();

        let result = ProbeComponentCommand::new(source, args("toolA", false))
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert_eq!(
            ui.spinner_results(),
            vec![("toolA".to_string(), SpinnerStatus::Success)]
        );
    }

    #[test]
    fn missing_component_exits_one() {
        let (_temp, source) = setup();
        let mut ui = MockUI::new();

        let result = ProbeComponentCommand::new(source, args("toolB", false))
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        let (message, status) = &ui.spinner_results()[0];
        assert_eq!(*status, SpinnerStatus::Error);
        assert!(message.contains("toolB not installed"));
    }

    #[test]
    fn unknown_component_lists_available_names() {
        let (_temp, source) = setup();
        let mut ui = MockUI::new();

        let err = ProbeComponentCommand::new(source, args("undefinedKey", false))
            .execute(&mut ui)
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Invalid validation component: undefinedKey. Available components to validate: toolA, toolB"
        );
    }

    #[test]
    fn json_output_describes_outcome() {
        let (_temp, source) = setup();
        let mut ui = MockUI::new();

        let result = ProbeComponentCommand::new(source, args("toolB", true))
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        let json: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(json["component"], "toolB");
        assert_eq!(json["installed"], false);
        assert_eq!(json["outcome"]["status"], "executable_not_found");
        assert_eq!(json["outcome"]["program"], MISSING);
    }
}
