//! Configuration loading, parsing, and validation for preflight.
//!
//! This module handles all aspects of configuration:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use preflight::config::{load_merged_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".preflight");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "components:\n  git: [git, --version]\n").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert!(config.components.get("git").is_some());
//! ```
//!
//! # Configuration File Locations
//!
//! preflight discovers and merges configuration in this order:
//! 1. User global config (`~/.preflight/config.yml`)
//! 2. Project config (`.preflight/config.yml`)
//! 3. Local overrides (`.preflight/config.local.yml`)

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use schema::{ComponentConfig, ComponentTable, PreflightConfig, Settings};

pub use loader::{
    find_project_root, load_config, load_config_file, load_config_value, load_merged_config,
    parse_config, project_config_path, ConfigPaths, CONFIG_DIR,
};

pub use merger::{deep_merge, merge_configs};

pub use validator::{validate, validate_config, ValidationError};
