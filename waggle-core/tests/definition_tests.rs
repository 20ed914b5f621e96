//! `ecs.json` loading and shallow merge.

use assert_fs::prelude::*;
use serde_json::json;
use waggle_core::{
    definition::{self, TaskDefinition},
    types::{RepositoryUri, TaskName},
    DefinitionError,
};

const NAMESPACE: &str = "beekeeper";
const REGION: &str = "us-east-1";

fn worker() -> TaskName {
    TaskName::parse("worker1").expect("valid name")
}

fn uri() -> RepositoryUri {
    RepositoryUri::from("123.dkr.ecr.us-east-1.amazonaws.com/beekeeper/worker1")
}

fn load(dir: &assert_fs::TempDir) -> Result<TaskDefinition, DefinitionError> {
    definition::load(dir.path(), &worker(), &uri(), NAMESPACE, REGION)
}

#[test]
fn absent_override_yields_skeleton() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let def = load(&dir).expect("load");
    assert_eq!(def, TaskDefinition::skeleton(&worker(), &uri(), NAMESPACE, REGION));
}

#[test]
fn memory_override_changes_only_memory() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("ecs.json").write_str(r#"{ "memory": 256 }"#).expect("write");

    let def = load(&dir).expect("load");
    let skeleton = TaskDefinition::skeleton(&worker(), &uri(), NAMESPACE, REGION);
    assert_eq!(def.get("memory"), Some(&json!(256)));
    for key in ["name", "image", "cpu", "logConfiguration"] {
        assert_eq!(def.get(key), skeleton.get(key), "key {key} must be unchanged");
    }
}

#[test]
fn override_adds_new_keys() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("ecs.json")
        .write_str(r#"{ "environment": [{ "name": "MODE", "value": "prod" }], "essential": true }"#)
        .expect("write");

    let def = load(&dir).expect("load");
    assert_eq!(def.get("essential"), Some(&json!(true)));
    assert_eq!(def.get("environment"), Some(&json!([{ "name": "MODE", "value": "prod" }])));
    assert_eq!(def.as_map().len(), 7);
}

#[test]
fn nested_override_replaces_block() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("ecs.json")
        .write_str(r#"{ "logConfiguration": { "logDriver": "syslog" } }"#)
        .expect("write");

    let def = load(&dir).expect("load");
    assert_eq!(def.get("logConfiguration"), Some(&json!({ "logDriver": "syslog" })));
}

#[test]
fn malformed_override_is_a_parse_error_with_path() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("ecs.json").write_str("{ memory: ").expect("write");

    let err = load(&dir).unwrap_err();
    assert!(matches!(err, DefinitionError::Parse { .. }), "got: {err}");
    assert!(err.to_string().contains("ecs.json"));
}

#[test]
fn non_object_override_is_rejected() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("ecs.json").write_str("[1, 2, 3]").expect("write");

    let err = load(&dir).unwrap_err();
    assert!(matches!(err, DefinitionError::NotAnObject { .. }), "got: {err}");
}
