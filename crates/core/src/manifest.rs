//! Project manifest parsing
//!
//! The manifest declares the set of named tasks the engine can run. It is
//! loaded once at startup and read-only afterwards; declaration order is
//! preserved because pattern resolution reports matches in that order.

use std::collections::HashSet;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::{GlobrunError, GlobrunResult};

/// File names probed (in order) when loading a manifest from a project root
const MANIFEST_FILE_NAMES: &[&str] = &["globrun.yml", "globrun.yaml"];

/// A single named task: a unique name plus the shell command it runs
#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TaskDeclaration {
    pub name: String,
    pub command: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ManifestConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Shell program used to execute task commands (defaults to the host shell)
    pub shell: Option<String>,
    pub tasks: Vec<TaskDeclaration>,
}

impl ManifestConfig {
    /// All declared task names, in declaration order
    pub fn task_names(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.name.as_str()).collect()
    }
}

pub fn parse_manifest(yaml_str: &str) -> GlobrunResult<ManifestConfig> {
    let config: ManifestConfig = serde_yaml::from_str(yaml_str)?;
    validate_manifest(&config)?;
    Ok(config)
}

/// Load the manifest from a project root, probing `globrun.yml` then `globrun.yaml`
pub fn load_manifest(project_root: &Path) -> GlobrunResult<ManifestConfig> {
    for file_name in MANIFEST_FILE_NAMES {
        let manifest_path = project_root.join(file_name);
        if !manifest_path.exists() {
            continue;
        }

        let content = std::fs::read_to_string(&manifest_path).map_err(|e| {
            GlobrunError::Config(format!(
                "Failed to read manifest {}: {}",
                manifest_path.display(),
                e
            ))
        })?;

        return parse_manifest(&content).map_err(|e| {
            GlobrunError::Config(format!(
                "Failed to parse manifest {}: {}",
                manifest_path.display(),
                e
            ))
        });
    }

    Err(GlobrunError::Config(format!(
        "No manifest (globrun.yml) found in {}",
        project_root.display()
    )))
}

fn validate_manifest(config: &ManifestConfig) -> GlobrunResult<()> {
    let mut seen = HashSet::new();

    for task in &config.tasks {
        if task.name.is_empty() {
            return Err(GlobrunError::Config(
                "Task with empty name in manifest".to_string(),
            ));
        }
        if task.command.trim().is_empty() {
            return Err(GlobrunError::Config(format!(
                "Task '{}' has an empty command",
                task.name
            )));
        }
        if !seen.insert(task.name.as_str()) {
            return Err(GlobrunError::Config(format!(
                "Duplicate task name '{}' in manifest",
                task.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest_preserves_declaration_order() {
        let yaml = r#"
name: demo
tasks:
  - name: "append:a"
    command: "echo a"
  - name: "append:b"
    command: "echo b"
  - name: "append:a:c"
    command: "echo c"
"#;
        let config = parse_manifest(yaml).unwrap();
        assert_eq!(
            config.task_names(),
            vec!["append:a", "append:b", "append:a:c"],
            "Task order should match the manifest"
        );
    }

    #[test]
    fn test_parse_manifest_with_shell_and_descriptions() {
        let yaml = r#"
shell: bash
tasks:
  - name: build
    command: cargo build
    description: Build everything
"#;
        let config = parse_manifest(yaml).unwrap();
        assert_eq!(config.shell.as_deref(), Some("bash"));
        assert_eq!(
            config.tasks[0].description.as_deref(),
            Some("Build everything")
        );
    }

    #[test]
    fn test_duplicate_task_names_are_rejected() {
        let yaml = r#"
tasks:
  - name: build
    command: cargo build
  - name: build
    command: cargo build --release
"#;
        let err = parse_manifest(yaml).unwrap_err();
        assert!(
            err.to_string().contains("Duplicate task name"),
            "Error should name the duplicate: {err}"
        );
    }

    #[test]
    fn test_empty_command_is_rejected() {
        let yaml = r#"
tasks:
  - name: build
    command: "  "
"#;
        assert!(parse_manifest(yaml).is_err());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let yaml = r#"
tasks:
  - name: build
    command: make
    timeout: 30
"#;
        assert!(parse_manifest(yaml).is_err());
    }

    #[test]
    fn test_load_manifest_from_project_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(
            temp_dir.path().join("globrun.yml"),
            "tasks:\n  - name: hello\n    command: echo hello\n",
        )
        .unwrap();

        let config = load_manifest(temp_dir.path()).unwrap();
        assert_eq!(config.task_names(), vec!["hello"]);
    }

    #[test]
    fn test_load_manifest_yaml_extension_fallback() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(
            temp_dir.path().join("globrun.yaml"),
            "tasks:\n  - name: hello\n    command: echo hello\n",
        )
        .unwrap();

        let config = load_manifest(temp_dir.path()).unwrap();
        assert_eq!(config.task_names(), vec!["hello"]);
    }

    #[test]
    fn test_load_manifest_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = load_manifest(temp_dir.path()).unwrap_err();
        assert!(
            err.to_string().contains("No manifest"),
            "Missing manifest should be a configuration error: {err}"
        );
    }
}
