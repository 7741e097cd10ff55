//! Error types for preflight operations.
//!
//! This module defines [`PreflightError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - "Executable not found" while probing is never an error: it is converted
//!   into a [`ProbeOutcome`](crate::checklist::ProbeOutcome) inside the probe
//! - Every other process failure propagates unmodified
//! - The two aggregate errors ([`PreflightError::UninstalledDependency`] and
//!   [`PreflightError::MissingModule`]) are raised only after a full scan
//! - Use `anyhow::Error` (via `PreflightError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

use crate::checklist::ProbeCommandError;

/// Core error type for preflight operations.
#[derive(Debug, Error)]
pub enum PreflightError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A probe command vector is malformed.
    #[error("Invalid probe command for '{component}': {source}")]
    InvalidProbeCommand {
        component: String,
        #[source]
        source: ProbeCommandError,
    },

    /// The same component name was supplied twice.
    #[error("Duplicate checklist component: {name}")]
    DuplicateComponent { name: String },

    /// A module name is not a dotted identifier path.
    #[error("Invalid module name: '{name}'")]
    InvalidModuleName { name: String },

    /// The same module name was supplied twice.
    #[error("Duplicate module: {name}")]
    DuplicateModule { name: String },

    /// Caller asked to validate a component that is not in the checklist.
    #[error(
        "Invalid validation component: {name}. Available components to validate: {}",
        .available.join(", ")
    )]
    UnknownComponent {
        name: String,
        available: Vec<String>,
    },

    /// A probe exited with a non-zero status where a zero exit is required.
    #[error("Command failed with exit code {code:?}: {command}")]
    ProcessExecutionFailure { command: String, code: Option<i32> },

    /// Spawning or waiting on a child process failed for a reason other
    /// than a missing executable.
    #[error("Failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// One or more system components are not installed.
    #[error("{components} not installed")]
    UninstalledDependency { components: String },

    /// One or more modules cannot be imported.
    #[error("python module(s) - '{modules}' cannot be found")]
    MissingModule { modules: String },

    /// Importing a module failed with something other than "not found".
    #[error("Importing module '{module}' failed with exit code {code:?}")]
    ModuleCheckFailed { module: String, code: Option<i32> },

    /// The interpreter used for module checks is not installed.
    #[error("Module check interpreter not found: {interpreter}")]
    InterpreterNotFound { interpreter: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PreflightError {
    /// Whether this error is one of the aggregate "something is missing"
    /// reports, as opposed to a configuration or execution failure.
    pub fn is_missing_dependency(&self) -> bool {
        matches!(
            self,
            PreflightError::UninstalledDependency { .. } | PreflightError::MissingModule { .. }
        )
    }
}

/// Result type alias for preflight operations.
pub type Result<T> = std::result::Result<T, PreflightError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = PreflightError::ConfigNotFound {
            path: PathBuf::from("/foo/config.yml"),
        };
        assert!(err.to_string().contains("/foo/config.yml"));
    }

    #[test]
    fn unknown_component_lists_available_names() {
        let err = PreflightError::UnknownComponent {
            name: "opencv".into(),
            available: vec!["cuda".into(), "cudnn".into()],
        };
        assert_eq!(
            err.to_string(),
            "Invalid validation component: opencv. Available components to validate: cuda, cudnn"
        );
    }

    #[test]
    fn uninstalled_dependency_names_components() {
        let err = PreflightError::UninstalledDependency {
            components: "cuda, deepstream".into(),
        };
        assert_eq!(err.to_string(), "cuda, deepstream not installed");
        assert!(err.is_missing_dependency());
    }

    #[test]
    fn missing_module_names_modules() {
        let err = PreflightError::MissingModule {
            modules: "numpy".into(),
        };
        assert_eq!(
            err.to_string(),
            "python module(s) - 'numpy' cannot be found"
        );
        assert!(err.is_missing_dependency());
    }

    #[test]
    fn process_failure_is_not_a_missing_dependency() {
        let err = PreflightError::ProcessExecutionFailure {
            command: "nvcc --version".into(),
            code: Some(2),
        };
        let msg = err.to_string();
        assert!(msg.contains("nvcc --version"));
        assert!(msg.contains('2'));
        assert!(!err.is_missing_dependency());
    }

    #[test]
    fn invalid_probe_command_includes_reason() {
        let err = PreflightError::InvalidProbeCommand {
            component: "tensorrt".into(),
            source: ProbeCommandError::Empty,
        };
        let msg = err.to_string();
        assert!(msg.contains("tensorrt"));
        assert!(msg.contains("empty"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: PreflightError = io_err.into();
        assert!(matches!(err, PreflightError::Io(_)));
    }

    #[test]
    fn anyhow_error_converts_to_other() {
        let err: PreflightError = anyhow::anyhow!("unexpected").into();
        assert!(matches!(err, PreflightError::Other(_)));
        assert_eq!(err.to_string(), "unexpected");
    }
}
