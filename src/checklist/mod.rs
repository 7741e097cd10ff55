//! Dependency checklist and verification.
//!
//! This module holds the pre-flight checklist: which system components must
//! be present (each with a probe command) and which modules must import.
//!
//! # Modules
//!
//! - [`command`] - Probe command vectors and pipe splitting
//! - [`registry`] - The immutable [`Checklist`]
//! - [`modules`] - Module import resolution
//! - [`status`] - Probe outcomes and scan reports
//! - [`checker`] - [`DependencyChecker`], which runs the whole check
//!
//! # Example
//!
//! ```no_run
//! use preflight::checklist::{Checklist, DependencyChecker};
//!
//! let checklist = Checklist::new([
//!     ("cuda", vec!["nvcc", "--version"]),
//!     ("tensorrt", vec!["dpkg", "-l", "|", "grep", "nvinfer"]),
//! ])?;
//!
//! let checker = DependencyChecker::new(checklist).with_modules(["numpy"])?;
//! checker.check_dependencies()?;
//! # Ok::<(), preflight::PreflightError>(())
//! ```

pub mod checker;
pub mod command;
pub mod modules;
pub mod registry;
pub mod status;

pub use checker::{CheckEvent, DependencyChecker};
pub use command::{ProbeCommand, ProbeCommandError, ProbeShape, PIPE_TOKEN};
pub use modules::{
    validate_module_name, ModuleResolver, PythonImporter, RegistryResolver, DEFAULT_INTERPRETER,
};
pub use registry::{Checklist, ChecklistEntry};
pub use status::{CheckReport, ModuleStatus, PipeStatusPolicy, ProbeOutcome};
