//! preflight - Verify system dependencies before a pipeline runs.
//!
//! preflight probes a fixed checklist of system components (CUDA, TensorRT,
//! DeepStream and the like) by running their probe commands, then checks
//! that the required Python modules import. Everything missing is reported
//! together after the full scan.
//!
//! # Modules
//!
//! - [`checklist`] - Probe commands, the immutable checklist, and the checker
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`shell`] - Argument-vector process execution
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use preflight::checklist::{Checklist, DependencyChecker};
//!
//! let checklist = Checklist::new([("cuda", ["nvcc", "--version"])]).unwrap();
//! let checker = DependencyChecker::new(checklist);
//!
//! assert!(checker.probe("tensorrt").is_err());
//! ```

pub mod checklist;
pub mod cli;
pub mod config;
pub mod error;
pub mod shell;
pub mod ui;

pub use error::{PreflightError, Result};
