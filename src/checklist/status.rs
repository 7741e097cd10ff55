//! Outcome and report types for dependency checks.
//!
//! Each probe produces a [`ProbeOutcome`]; a full scan produces a
//! [`CheckReport`] which turns into the aggregate error (if any).

use serde::{Deserialize, Serialize};

use crate::error::{PreflightError, Result};

/// The result of running one probe command to completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// Every executable in the probe was found and ran.
    Installed,

    /// Process creation reported that an executable does not exist.
    ExecutableNotFound {
        /// The program that could not be spawned.
        program: String,
    },
}

impl ProbeOutcome {
    /// Whether the component should be reported as not installed.
    pub fn is_missing(&self) -> bool {
        matches!(self, ProbeOutcome::ExecutableNotFound { .. })
    }
}

/// Which stages of a piped probe must exit zero.
///
/// Only a missing executable ever means "not installed"; an enforced
/// non-zero exit is a `ProcessExecutionFailure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PipeStatusPolicy {
    /// Exit statuses of both stages are ignored.
    #[default]
    Ignore,
    /// The right (last) stage must exit zero.
    LastStage,
    /// Both stages must exit zero.
    AllStages,
}

/// Whether a module resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleStatus {
    /// The module imported successfully.
    Found,
    /// The module does not exist in the environment.
    NotFound,
}

impl ModuleStatus {
    /// Whether the module should be reported as missing.
    pub fn is_missing(&self) -> bool {
        matches!(self, ModuleStatus::NotFound)
    }
}

/// Everything a full scan found missing.
///
/// Both lists keep the order in which items were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Components whose probe reported a missing executable.
    pub missing_components: Vec<String>,
    /// Modules that could not be found.
    pub missing_modules: Vec<String>,
}

impl CheckReport {
    /// Whether nothing is missing.
    pub fn is_satisfied(&self) -> bool {
        self.missing_components.is_empty() && self.missing_modules.is_empty()
    }

    /// Convert the report into the aggregate error, if any.
    ///
    /// Missing components take priority; missing modules are only reported
    /// when every component probe passed.
    pub fn into_result(self) -> Result<()> {
        if !self.missing_components.is_empty() {
            return Err(PreflightError::UninstalledDependency {
                components: self.missing_components.join(", "),
            });
        }

        if !self.missing_modules.is_empty() {
            return Err(PreflightError::MissingModule {
                modules: self.missing_modules.join(", "),
            });
        }

        Ok(())
    }
}
