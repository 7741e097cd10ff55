//! Deep merge for layered YAML configuration.
//!
//! # Merge Rules
//!
//! - Mappings are merged recursively, keeping the base's key order
//! - Sequences are replaced entirely
//! - Null in an overlay deletes the key from the base
//! - Scalars in an overlay replace the base value

use serde_yaml::Value;

/// Deep merge two YAML values; `overlay` takes precedence.
///
/// Keys new to the overlay are appended after the base's keys, so the
/// order of components in a merged table is base order, then additions.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut result = base_map.clone();

            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    result.shift_remove(key);
                } else if let Some(base_value) = base_map.get(key) {
                    result.insert(key.clone(), deep_merge(base_value, overlay_value));
                } else {
                    result.insert(key.clone(), overlay_value.clone());
                }
            }

            Value::Mapping(result)
        }

        (_, overlay) => overlay.clone(),
    }
}

/// Merge config layers in order (later overrides earlier).
///
/// A layer that is entirely null (an empty file) contributes nothing.
pub fn merge_configs(configs: &[Value]) -> Value {
    configs
        .iter()
        .filter(|config| !config.is_null())
        .fold(Value::Mapping(Default::default()), |acc, config| {
            deep_merge(&acc, config)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn probe_command_is_replaced_not_merged() {
        let base = yaml(
            r#"
components:
  cuda: [nvcc, --version]
"#,
        );
        let overlay = yaml(
            r#"
components:
  cuda: [/usr/local/cuda/bin/nvcc, -V]
"#,
        );

        let result = deep_merge(&base, &overlay);
        let command = result["components"]["cuda"].as_sequence().unwrap();

        assert_eq!(command.len(), 2);
        assert_eq!(command[0], "/usr/local/cuda/bin/nvcc");
    }

    #[test]
    fn null_removes_inherited_component() {
        let base = yaml(
            r#"
components:
  cuda: [nvcc, --version]
  tensorrt: [dpkg, -l, "|", grep, nvinfer]
"#,
        );
        let overlay = yaml(
            r#"
components:
  tensorrt: null
"#,
        );

        let result = deep_merge(&base, &overlay);

        assert!(result["components"].get("tensorrt").is_none());
        assert!(result["components"].get("cuda").is_some());
    }

    #[test]
    fn null_keeps_order_of_remaining_components() {
        let base = yaml(
            r#"
components:
  alpha: [a]
  beta: [b]
  gamma: [g]
  delta: [d]
"#,
        );
        let overlay = yaml("components:\n  alpha: null\n  gamma: null\n");

        let merged = merge_configs(&[base, overlay]);
        let config: crate::config::PreflightConfig = serde_yaml::from_value(merged).unwrap();
        let names: Vec<&str> = config.components.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, ["beta", "delta"]);
    }

    #[test]
    fn null_on_middle_component_keeps_neighbours_in_place() {
        let base = yaml("components:\n  alpha: [a]\n  beta: [b]\n  gamma: [g]\n");
        let overlay = yaml("components:\n  beta: null\n");

        let result = deep_merge(&base, &overlay);
        let keys: Vec<&str> = result["components"]
            .as_mapping()
            .unwrap()
            .keys()
            .map(|k| k.as_str().unwrap())
            .collect();

        assert_eq!(keys, ["alpha", "gamma"]);
    }

    #[test]
    fn component_order_is_base_then_additions() {
        let base = yaml("components:\n  zeta: [z]\n  alpha: [a]\n");
        let overlay = yaml("components:\n  mid: [m]\n  zeta: [zz]\n");

        let result = deep_merge(&base, &overlay);
        let keys: Vec<&str> = result["components"]
            .as_mapping()
            .unwrap()
            .keys()
            .map(|k| k.as_str().unwrap())
            .collect();

        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn settings_merge_recursively() {
        let base = yaml(
            r#"
settings:
  python: python3
  pipe_status: all-stages
"#,
        );
        let overlay = yaml(
            r#"
settings:
  python: /opt/venv/bin/python
"#,
        );

        let result = deep_merge(&base, &overlay);

        assert_eq!(result["settings"]["python"], "/opt/venv/bin/python");
        assert_eq!(result["settings"]["pipe_status"], "all-stages");
    }

    #[test]
    fn modules_list_is_replaced() {
        let base = yaml("modules: [numpy, cv2]");
        let overlay = yaml("modules: [torch]");

        let result = deep_merge(&base, &overlay);
        assert_eq!(result["modules"].as_sequence().unwrap().len(), 1);
    }

    #[test]
    fn scalar_overlay_replaces_mapping_base() {
        let base = yaml("settings:\n  python: python3\n");
        let overlay = yaml("settings: disabled\n");

        let result = deep_merge(&base, &overlay);
        assert_eq!(result["settings"], "disabled");
    }

    #[test]
    fn merge_configs_merges_multiple_in_order() {
        let configs = vec![yaml("a: 1\nb: 2"), yaml("b: 3\nc: 4"), yaml("c: 5")];

        let result = merge_configs(&configs);

        assert_eq!(result["a"], 1);
        assert_eq!(result["b"], 3);
        assert_eq!(result["c"], 5);
    }

    #[test]
    fn merge_configs_skips_empty_layers() {
        let configs = vec![yaml("app_name: Base"), Value::Null];

        let result = merge_configs(&configs);
        assert_eq!(result["app_name"], "Base");
    }

    #[test]
    fn merge_empty_configs_returns_empty() {
        let result = merge_configs(&[]);
        assert!(result.as_mapping().unwrap().is_empty());
    }
}
