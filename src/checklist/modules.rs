//! Module presence checks.
//!
//! "Does this module import?" is answered by a [`ModuleResolver`]. The
//! default [`PythonImporter`] asks a Python interpreter to import the module;
//! [`RegistryResolver`] answers from a fixed set of names.

use std::collections::HashSet;
use std::io;
use std::process::{Command, Stdio};
use std::sync::LazyLock;

use regex::Regex;

use crate::checklist::status::ModuleStatus;
use crate::error::{PreflightError, Result};

/// Interpreter used when the configuration does not name one.
pub const DEFAULT_INTERPRETER: &str = "python3";

/// Exit code the import script uses for `ModuleNotFoundError`.
const MODULE_NOT_FOUND_EXIT: i32 = 3;

/// Imports `sys.argv[1]`. The module name is only ever data.
const IMPORT_SCRIPT: &str = "\
import importlib, sys
try:
    importlib.import_module(sys.argv[1])
except ModuleNotFoundError:
    sys.exit(3)
";

static MODULE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{XID_Start}_]\p{XID_Continue}*(\.[\p{XID_Start}_]\p{XID_Continue}*)*$")
        .unwrap()
});

/// Check that `name` is a dotted identifier path such as `numpy` or
/// `google.protobuf`. Identifiers follow Unicode XID rules, so non-ASCII
/// names like `café` are accepted.
pub fn validate_module_name(name: &str) -> Result<()> {
    if MODULE_NAME.is_match(name) {
        Ok(())
    } else {
        Err(PreflightError::InvalidModuleName {
            name: name.to_string(),
        })
    }
}

/// Resolves whether a named module is importable.
pub trait ModuleResolver {
    /// Check one module.
    ///
    /// Returns `NotFound` only for a module-not-found condition; any other
    /// failure is an error.
    fn resolve(&self, module: &str) -> Result<ModuleStatus>;
}

/// Imports modules with a Python interpreter in a child process.
#[derive(Debug, Clone)]
pub struct PythonImporter {
    interpreter: String,
}

impl PythonImporter {
    /// Use the given interpreter program (e.g., "python3" or a venv path).
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    /// The interpreter program.
    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }
}

impl Default for PythonImporter {
    fn default() -> Self {
        Self::new(DEFAULT_INTERPRETER)
    }
}

impl ModuleResolver for PythonImporter {
    fn resolve(&self, module: &str) -> Result<ModuleStatus> {
        validate_module_name(module)?;
        tracing::debug!(interpreter = %self.interpreter, module, "importing module");

        let status = Command::new(&self.interpreter)
            .args(["-c", IMPORT_SCRIPT, module])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => PreflightError::InterpreterNotFound {
                    interpreter: self.interpreter.clone(),
                },
                _ => PreflightError::Spawn {
                    command: format!("{} -c <import {}>", self.interpreter, module),
                    source: e,
                },
            })?;

        classify_exit(module, status.code())
    }
}

/// Map the import script's exit code to a module status.
fn classify_exit(module: &str, code: Option<i32>) -> Result<ModuleStatus> {
    match code {
        Some(0) => Ok(ModuleStatus::Found),
        Some(MODULE_NOT_FOUND_EXIT) => Ok(ModuleStatus::NotFound),
        other => Err(PreflightError::ModuleCheckFailed {
            module: module.to_string(),
            code: other,
        }),
    }
}

/// Resolves modules by explicit registry lookup.
#[derive(Debug, Clone, Default)]
pub struct RegistryResolver {
    available: HashSet<String>,
}

impl RegistryResolver {
    /// Create a resolver that knows exactly these modules.
    pub fn new<I, S>(available: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            available: available.into_iter().map(Into::into).collect(),
        }
    }
}

impl ModuleResolver for RegistryResolver {
    fn resolve(&self, module: &str) -> Result<ModuleStatus> {
        validate_module_name(module)?;
        if self.available.contains(module) {
            Ok(ModuleStatus::Found)
        } else {
            Ok(ModuleStatus::NotFound)
        }
    }
}
