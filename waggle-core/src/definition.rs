//! ECS container definitions: the default skeleton and `ecs.json` overrides.
//!
//! Overrides are merged **shallowly**: a top-level key in `ecs.json` replaces
//! the default value wholesale, so an override of `logConfiguration` drops
//! every default log option it does not restate.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

use crate::error::DefinitionError;
use crate::types::{RepositoryUri, TaskName};

/// Name of the per-task override document inside the build directory.
pub const OVERRIDE_FILE: &str = "ecs.json";

pub const DEFAULT_MEMORY: u64 = 128;
pub const DEFAULT_CPU: u64 = 0;
pub const LOG_DRIVER: &str = "awslogs";
/// Network mode every task family is registered with.
pub const NETWORK_MODE: &str = "bridge";

/// A single container definition, kept as an open JSON object so overrides
/// can carry any key ECS understands.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDefinition(Map<String, Value>);

impl TaskDefinition {
    /// The default definition for `task`, before any override is applied.
    pub fn skeleton(task: &TaskName, image: &RepositoryUri, namespace: &str, region: &str) -> Self {
        let mut map = Map::new();
        map.insert("name".into(), json!(task.as_str()));
        map.insert("image".into(), json!(image.as_str()));
        map.insert("memory".into(), json!(DEFAULT_MEMORY));
        map.insert("cpu".into(), json!(DEFAULT_CPU));
        map.insert(
            "logConfiguration".into(),
            json!({
                "logDriver": LOG_DRIVER,
                "options": {
                    "awslogs-group": namespace,
                    "awslogs-region": region,
                    "awslogs-stream-prefix": task.as_str(),
                }
            }),
        );
        Self(map)
    }

    /// Shallow merge: every top-level key of `overrides` replaces or adds.
    pub fn merge(&mut self, overrides: Map<String, Value>) {
        for (key, value) in overrides {
            self.0.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The `containerDefinitions` payload: a one-element JSON array.
    pub fn to_container_definitions(&self) -> Value {
        Value::Array(vec![Value::Object(self.0.clone())])
    }
}

/// `<dir>/ecs.json`
pub fn override_path(dir: &Path) -> PathBuf {
    dir.join(OVERRIDE_FILE)
}

/// Read the override document from `dir`.
///
/// Returns `Ok(None)` when the file does not exist; every other failure,
/// including a top level that is not a JSON object, is an error.
pub fn load_overrides(dir: &Path) -> Result<Option<Map<String, Value>>, DefinitionError> {
    let path = override_path(dir);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(DefinitionError::Io { path, source }),
    };

    match serde_json::from_str::<Value>(&contents) {
        Ok(Value::Object(map)) => Ok(Some(map)),
        Ok(_) => Err(DefinitionError::NotAnObject { path }),
        Err(source) => Err(DefinitionError::Parse { path, source }),
    }
}

/// Build the definition for a task: skeleton plus `<source_path>/ecs.json`.
pub fn load(
    source_path: &Path,
    task: &TaskName,
    image: &RepositoryUri,
    namespace: &str,
    region: &str,
) -> Result<TaskDefinition, DefinitionError> {
    let mut definition = TaskDefinition::skeleton(task, image, namespace, region);
    match load_overrides(source_path)? {
        Some(overrides) => {
            let mut keys: Vec<_> = overrides.iter().collect();
            keys.sort_by(|a, b| a.0.cmp(b.0));
            for (key, value) in keys {
                tracing::info!(task = %task, %key, %value, "ecs.json override");
            }
            definition.merge(overrides);
        }
        None => {
            tracing::debug!(task = %task, "no {OVERRIDE_FILE} found; using defaults");
        }
    }
    Ok(definition)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
