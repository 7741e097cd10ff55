//! Dependency checker.
//!
//! The `DependencyChecker` runs every probe in the checklist, then every
//! module import, and reports everything that is missing in one pass.

use std::collections::HashSet;

use crate::checklist::modules::{validate_module_name, ModuleResolver, PythonImporter};
use crate::checklist::registry::Checklist;
use crate::checklist::status::{CheckReport, ModuleStatus, PipeStatusPolicy, ProbeOutcome};
use crate::config::PreflightConfig;
use crate::error::{PreflightError, Result};
use crate::shell::run_probe;

/// Progress notifications emitted during a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckEvent<'a> {
    /// A component probe is about to run.
    ProbeStarted { component: &'a str },
    /// A component probe completed.
    ProbeFinished {
        component: &'a str,
        outcome: &'a ProbeOutcome,
    },
    /// A module import check completed.
    ModuleChecked {
        module: &'a str,
        status: ModuleStatus,
    },
}

/// Verifies that every checklist component and module is present.
///
/// Probes run one at a time in checklist order; the checker holds no
/// mutable state, so repeated checks are independent.
pub struct DependencyChecker {
    checklist: Checklist,
    modules: Vec<String>,
    resolver: Box<dyn ModuleResolver>,
    pipe_status: PipeStatusPolicy,
}

impl DependencyChecker {
    /// Create a checker for a checklist with no modules to import.
    pub fn new(checklist: Checklist) -> Self {
        Self {
            checklist,
            modules: Vec::new(),
            resolver: Box::new(PythonImporter::default()),
            pipe_status: PipeStatusPolicy::default(),
        }
    }

    /// Build a checker from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns the first invalid probe command, duplicate component or
    /// invalid module name found.
    pub fn from_config(config: &PreflightConfig) -> Result<Self> {
        let checklist = Checklist::new(
            config
                .components
                .iter()
                .map(|c| (c.name.clone(), c.command.clone())),
        )?;

        Ok(Self::new(checklist)
            .with_modules(config.modules.iter().cloned())?
            .with_resolver(PythonImporter::new(config.settings.python.clone()))
            .with_pipe_status(config.settings.pipe_status))
    }

    /// Set the modules to import-check, in check order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidModuleName` if a name is not a dotted identifier, or
    /// `DuplicateModule` if a name appears twice.
    pub fn with_modules<I, S>(mut self, modules: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let modules: Vec<String> = modules.into_iter().map(Into::into).collect();
        let mut seen = HashSet::new();
        for module in &modules {
            validate_module_name(module)?;
            if !seen.insert(module.as_str()) {
                return Err(PreflightError::DuplicateModule {
                    name: module.clone(),
                });
            }
        }
        self.modules = modules;
        Ok(self)
    }

    /// Replace the module resolver.
    pub fn with_resolver(mut self, resolver: impl ModuleResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Set which pipeline stages must exit zero.
    pub fn with_pipe_status(mut self, policy: PipeStatusPolicy) -> Self {
        self.pipe_status = policy;
        self
    }

    /// The checklist being verified.
    pub fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    /// Modules to import-check.
    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    /// The pipe-status policy in effect.
    pub fn pipe_status(&self) -> PipeStatusPolicy {
        self.pipe_status
    }

    /// Run the probe for one component and return its outcome.
    ///
    /// # Errors
    ///
    /// Returns `UnknownComponent` if `component` is not in the checklist.
    /// Process failures other than a missing executable propagate.
    pub fn probe_outcome(&self, component: &str) -> Result<ProbeOutcome> {
        let command = self
            .checklist
            .get(component)
            .ok_or_else(|| PreflightError::UnknownComponent {
                name: component.to_string(),
                available: self.checklist.names().map(str::to_string).collect(),
            })?;

        run_probe(command, self.pipe_status)
    }

    /// Check whether a component is NOT installed.
    ///
    /// Returns `true` only when an executable in the probe could not be
    /// found. A probe that runs to completion returns `false`.
    pub fn probe(&self, component: &str) -> Result<bool> {
        Ok(self.probe_outcome(component)?.is_missing())
    }

    /// Probe every component and import every module.
    ///
    /// Nothing short-circuits on a missing item; the report lists all of
    /// them in check order.
    pub fn scan(&self) -> Result<CheckReport> {
        self.scan_with(|_| {})
    }

    /// Like [`scan`](Self::scan), reporting progress to `observer`.
    pub fn scan_with<F>(&self, mut observer: F) -> Result<CheckReport>
    where
        F: FnMut(CheckEvent<'_>),
    {
        let mut report = CheckReport::default();

        for entry in &self.checklist {
            let component = entry.name();
            observer(CheckEvent::ProbeStarted { component });

            let outcome = self.probe_outcome(component)?;
            observer(CheckEvent::ProbeFinished {
                component,
                outcome: &outcome,
            });

            if let ProbeOutcome::ExecutableNotFound { program } = &outcome {
                tracing::warn!(component, program = %program, "component not installed");
                report.missing_components.push(component.to_string());
            }
        }

        for module in &self.modules {
            let status = self.resolver.resolve(module)?;
            observer(CheckEvent::ModuleChecked { module, status });

            if status.is_missing() {
                tracing::warn!(module = %module, "module cannot be imported");
                report.missing_modules.push(module.clone());
            }
        }

        tracing::info!(
            components = self.checklist.len(),
            modules = self.modules.len(),
            missing_components = report.missing_components.len(),
            missing_modules = report.missing_modules.len(),
            "dependency scan complete"
        );

        Ok(report)
    }

    /// Verify every dependency, failing with the aggregate error.
    ///
    /// # Errors
    ///
    /// `UninstalledDependency` if any component is missing, otherwise
    /// `MissingModule` if any module is missing. Other errors propagate.
    pub fn check_dependencies(&self) -> Result<()> {
        self.scan()?.into_result()
    }
}
