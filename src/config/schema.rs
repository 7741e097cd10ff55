//! Configuration schema definitions for preflight.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file format.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::checklist::{PipeStatusPolicy, DEFAULT_INTERPRETER};

/// Root configuration structure for `.preflight/config.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreflightConfig {
    /// Application name (for display purposes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    /// System components to probe, in check order
    pub components: ComponentTable,

    /// Python modules that must be importable, in check order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<String>,

    /// Global settings
    pub settings: Settings,
}

/// Global settings for a check run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Interpreter used for module import checks
    pub python: String,

    /// Which pipeline stages must exit zero
    pub pipe_status: PipeStatusPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            python: DEFAULT_INTERPRETER.to_string(),
            pipe_status: PipeStatusPolicy::default(),
        }
    }
}

/// A single component as written in config, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentConfig {
    /// Component name
    pub name: String,
    /// Probe command tokens
    pub command: Vec<String>,
}

/// Ordered component table.
///
/// Written as a YAML mapping; document order is kept because it is the
/// order probes run and failures are reported in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentTable(Vec<ComponentConfig>);

impl ComponentTable {
    /// Components in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, ComponentConfig> {
        self.0.iter()
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no components.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a component by name.
    pub fn get(&self, name: &str) -> Option<&ComponentConfig> {
        self.0.iter().find(|c| c.name == name)
    }
}

impl<N, C, S> FromIterator<(N, C)> for ComponentTable
where
    N: Into<String>,
    C: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, command)| ComponentConfig {
                    name: name.into(),
                    command: command.into_iter().map(Into::into).collect(),
                })
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a ComponentTable {
    type Item = &'a ComponentConfig;
    type IntoIter = std::slice::Iter<'a, ComponentConfig>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for ComponentTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for component in &self.0 {
            map.serialize_entry(&component.name, &component.command)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ComponentTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ComponentTableVisitor)
    }
}

struct ComponentTableVisitor;

impl<'de> Visitor<'de> for ComponentTableVisitor {
    type Value = ComponentTable;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of component name to probe command")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries: Vec<ComponentConfig> = Vec::with_capacity(map.size_hint().unwrap_or(0));

        while let Some((name, command)) = map.next_entry::<String, Vec<String>>()? {
            if entries.iter().any(|c| c.name == name) {
                return Err(de::Error::custom(format!(
                    "duplicate component '{}'",
                    name
                )));
            }
            entries.push(ComponentConfig { name, command });
        }

        Ok(ComponentTable(entries))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ComponentTable::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ComponentTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let yaml = r#"
app_name: Vision pipeline
components:
  cuda: [nvcc, --version]
  tensorrt: [dpkg, -l, "|", grep, nvinfer]
modules:
  - numpy
  - cv2
settings:
  python: /opt/venv/bin/python
  pipe_status: last-stage
"#;
        let config: PreflightConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.app_name.as_deref(), Some("Vision pipeline"));
        assert_eq!(config.components.len(), 2);
        assert_eq!(
            config.components.get("tensorrt").unwrap().command,
            ["dpkg", "-l", "|", "grep", "nvinfer"]
        );
        assert_eq!(config.modules, ["numpy", "cv2"]);
        assert_eq!(config.settings.python, "/opt/venv/bin/python");
        assert_eq!(config.settings.pipe_status, PipeStatusPolicy::LastStage);
    }

    #[test]
    fn component_order_follows_document() {
        let yaml = r#"
components:
  zeta: [z]
  alpha: [a]
  mid: [m]
"#;
        let config: PreflightConfig = serde_yaml::from_str(yaml).unwrap();
        let names: Vec<&str> = config.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn defaults_apply_to_missing_sections() {
        let config: PreflightConfig = serde_yaml::from_str("app_name: empty").unwrap();
        assert!(config.components.is_empty());
        assert!(config.modules.is_empty());
        assert_eq!(config.settings, Settings::default());
        assert_eq!(config.settings.python, "python3");
        assert_eq!(config.settings.pipe_status, PipeStatusPolicy::Ignore);
    }

    #[test]
    fn rejects_non_sequence_probe_command() {
        let yaml = "components:\n  cuda: nvcc --version\n";
        let result: Result<PreflightConfig, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unknown_pipe_status() {
        let yaml = "settings:\n  pipe_status: maybe\n";
        let result: Result<PreflightConfig, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn serializes_components_as_ordered_mapping() {
        let config = PreflightConfig {
            components: [("b", vec!["true"]), ("a", vec!["false"])]
                .into_iter()
                .collect(),
            ..Default::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        let b = yaml.find("b:").unwrap();
        let a = yaml.find("a:").unwrap();
        assert!(b < a);
    }

    #[test]
    fn component_table_collects_from_pairs() {
        let table: ComponentTable = [("cuda", vec!["nvcc", "--version"])].into_iter().collect();
        assert_eq!(table.get("cuda").unwrap().command, ["nvcc", "--version"]);
        assert!(table.get("cudnn").is_none());
    }
}
