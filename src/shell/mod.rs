//! Process execution and environment detection.
//!
//! Probe commands are always executed from an explicit argument vector;
//! no function in this module accepts a shell string.

pub mod platform;
pub mod probe;

pub use platform::{is_ci, is_ci_with};
pub use probe::run_probe;
