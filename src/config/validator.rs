//! Configuration validation rules.
//!
//! This module validates configuration for correctness:
//! - Probe commands must be well-formed argument vectors
//! - Module names must be dotted identifier paths, listed once
//! - The module-check interpreter must be named

use crate::checklist::{validate_module_name, ProbeCommand};
use crate::config::schema::PreflightConfig;
use crate::error::{PreflightError, Result};
use std::collections::HashSet;

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Component name if the error is component-specific
    pub component: Option<String>,
}

/// Validate a configuration and return all errors.
///
/// Every problem is collected rather than stopping at the first one.
pub fn validate_config(config: &PreflightConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_components(config));
    errors.extend(validate_modules(config));
    errors.extend(validate_settings(config));

    errors
}

fn validate_components(config: &PreflightConfig) -> Vec<ValidationError> {
    config
        .components
        .iter()
        .filter_map(|component| {
            ProbeCommand::parse(component.command.iter().cloned())
                .err()
                .map(|e| ValidationError {
                    rule: "invalid-probe-command".to_string(),
                    message: format!("Component '{}': {}", component.name, e),
                    component: Some(component.name.clone()),
                })
        })
        .collect()
}

fn validate_modules(config: &PreflightConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for module in &config.modules {
        if validate_module_name(module).is_err() {
            errors.push(ValidationError {
                rule: "invalid-module-name".to_string(),
                message: format!("Module '{}' is not a dotted identifier", module),
                component: None,
            });
        } else if !seen.insert(module.as_str()) {
            errors.push(ValidationError {
                rule: "duplicate-module".to_string(),
                message: format!("Module '{}' is listed more than once", module),
                component: None,
            });
        }
    }

    errors
}

fn validate_settings(config: &PreflightConfig) -> Vec<ValidationError> {
    if config.settings.python.trim().is_empty() {
        vec![ValidationError {
            rule: "empty-interpreter".to_string(),
            message: "settings.python must name an interpreter".to_string(),
            component: None,
        }]
    } else {
        Vec::new()
    }
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(config: &PreflightConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(PreflightError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(yaml: &str) -> PreflightConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn valid_config_returns_no_errors() {
        let config = config(
            r#"
components:
  cuda: [nvcc, --version]
  tensorrt: [dpkg, -l, "|", grep, nvinfer]
modules: [numpy, google.protobuf]
"#,
        );
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn rejects_empty_probe_command() {
        let config = config("components:\n  cuda: []\n");

        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, "invalid-probe-command");
        assert_eq!(errors[0].component.as_deref(), Some("cuda"));
    }

    #[test]
    fn rejects_malformed_pipes() {
        let config = config(
            r#"
components:
  a: ["|", grep, x]
  b: [dpkg, "|"]
  c: [a, "|", b, "|", c]
"#,
        );

        let errors = validate_config(&config);
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().all(|e| e.rule == "invalid-probe-command"));
    }

    #[test]
    fn rejects_invalid_module_names() {
        let config = config("modules: [numpy, \"os; rm -rf\", 1bad]\n");

        let errors = validate_config(&config);
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.rule == "invalid-module-name")
                .count(),
            2
        );
    }

    #[test]
    fn rejects_duplicate_modules() {
        let config = config("modules: [numpy, numpy]\n");

        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.rule == "duplicate-module"));
    }

    #[test]
    fn rejects_empty_interpreter() {
        let config = config("settings:\n  python: \"  \"\n");

        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| e.rule == "empty-interpreter"));
    }

    #[test]
    fn validate_joins_all_messages() {
        let config = config("components:\n  cuda: []\nmodules: [\"bad name\"]\n");

        match validate(&config) {
            Err(PreflightError::ConfigValidationError { message }) => {
                assert!(message.contains("cuda"));
                assert!(message.contains("bad name"));
                assert!(message.contains("; "));
            }
            other => panic!("Expected ConfigValidationError, got {:?}", other),
        }
    }

    #[test]
    fn validate_accepts_default_config() {
        assert!(validate(&PreflightConfig::default()).is_ok());
    }
}
