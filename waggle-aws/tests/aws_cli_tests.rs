//! `AwsCli` against a scripted stand-in for the `aws` binary.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use waggle_aws::AwsCli;
use waggle_core::{
    types::{RepositoryName, RepositoryUri, Revision, TaskName},
    AwsSettings, OrchestrationClient, OrchestrationError, RegistryClient, RegistryError,
    TaskDefinition,
};

const URI: &str = "123456789012.dkr.ecr.us-east-1.amazonaws.com/beekeeper/worker1";

/// Writes an executable `aws` script that logs its argv and credentials to
/// `calls.log` and then runs `body` (a `case "$1 $2"` arm list).
fn fake_aws(dir: &TempDir, body: &str) -> (PathBuf, PathBuf) {
    let log = dir.path().join("calls.log");
    let script = dir.path().join("aws");
    let contents = format!(
        "#!/bin/sh\n\
         echo \"$* key=$AWS_ACCESS_KEY_ID region=$AWS_DEFAULT_REGION\" >> '{log}'\n\
         case \"$1 $2\" in\n{body}\nesac\n",
        log = log.display()
    );
    fs::write(&script, contents).expect("write script");
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("chmod");
    (script, log)
}

fn settings() -> AwsSettings {
    AwsSettings {
        region: "us-east-1".into(),
        access_key_id: "AKIATEST".into(),
        secret_access_key: "s3cret".into(),
    }
}

fn repo() -> RepositoryName {
    RepositoryName::new("beekeeper", &TaskName::parse("worker1").unwrap())
}

fn read_log(log: &Path) -> String {
    fs::read_to_string(log).unwrap_or_default()
}

#[test]
fn describe_existing_repository_returns_uri() {
    let dir = TempDir::new().unwrap();
    let (script, log) = fake_aws(
        &dir,
        &format!(
            "  'ecr describe-repositories') echo '{{\"repositories\":[{{\"repositoryUri\":\"{URI}\"}}]}}' ;;"
        ),
    );
    let aws = AwsCli::new(script, settings());

    let uri = aws.describe_repository(&repo()).expect("describe");
    assert_eq!(uri, RepositoryUri::from(URI));

    let calls = read_log(&log);
    assert!(calls.contains("ecr describe-repositories --repository-names beekeeper/worker1"));
    assert!(calls.contains("--region us-east-1 --output json"));
    assert!(calls.contains("key=AKIATEST region=us-east-1"));
}

#[test]
fn describe_missing_repository_is_classified_not_found() {
    let dir = TempDir::new().unwrap();
    let (script, _log) = fake_aws(
        &dir,
        "  'ecr describe-repositories') echo 'An error occurred (RepositoryNotFoundException) when calling the DescribeRepositories operation: missing' >&2; exit 254 ;;",
    );
    let aws = AwsCli::new(script, settings());

    let err = aws.describe_repository(&repo()).unwrap_err();
    assert!(err.is_not_found(), "got: {err}");
}

#[test]
fn describe_other_failure_is_not_not_found() {
    let dir = TempDir::new().unwrap();
    let (script, _log) = fake_aws(
        &dir,
        "  'ecr describe-repositories') echo 'An error occurred (AccessDeniedException) when calling the DescribeRepositories operation: denied' >&2; exit 254 ;;",
    );
    let aws = AwsCli::new(script, settings());

    let err = aws.describe_repository(&repo()).unwrap_err();
    assert!(!err.is_not_found());
    match err {
        RegistryError::Api { code, .. } => assert_eq!(code.as_deref(), Some("AccessDeniedException")),
        other => panic!("expected API error, got {other}"),
    }
}

#[test]
fn failure_without_error_code_is_a_tool_error() {
    let dir = TempDir::new().unwrap();
    let (script, _log) = fake_aws(&dir, "  *) echo 'Unable to locate credentials' >&2; exit 253 ;;");
    let aws = AwsCli::new(script, settings());

    let err = aws.create_repository(&repo()).unwrap_err();
    assert!(matches!(err, RegistryError::Tool(_)), "got: {err}");
    assert!(err.to_string().contains("Unable to locate credentials"));
}

#[test]
fn create_repository_returns_new_uri() {
    let dir = TempDir::new().unwrap();
    let (script, log) = fake_aws(
        &dir,
        &format!("  'ecr create-repository') echo '{{\"repository\":{{\"repositoryUri\":\"{URI}\"}}}}' ;;"),
    );
    let aws = AwsCli::new(script, settings());

    assert_eq!(aws.create_repository(&repo()).expect("create").as_str(), URI);
    assert!(read_log(&log).contains("ecr create-repository --repository-name beekeeper/worker1"));
}

#[test]
fn authorization_decodes_token() {
    let dir = TempDir::new().unwrap();
    let (script, _log) = fake_aws(
        &dir,
        "  'ecr get-authorization-token') echo '{\"authorizationData\":[{\"authorizationToken\":\"QVdTOnNlY3JldA==\",\"proxyEndpoint\":\"https://123456789012.dkr.ecr.us-east-1.amazonaws.com\"}]}' ;;",
    );
    let aws = AwsCli::new(script, settings());

    let login = aws.authorization().expect("authorization");
    assert_eq!(login.username, "AWS");
    assert_eq!(login.password, "secret");
    assert_eq!(login.endpoint, "https://123456789012.dkr.ecr.us-east-1.amazonaws.com");
}

#[test]
fn register_task_definition_returns_revision() {
    let dir = TempDir::new().unwrap();
    let (script, log) = fake_aws(
        &dir,
        "  'ecs register-task-definition') echo '{\"taskDefinition\":{\"family\":\"worker1\",\"revision\":7}}' ;;",
    );
    let aws = AwsCli::new(script, settings());
    let task = TaskName::parse("worker1").unwrap();
    let definition =
        TaskDefinition::skeleton(&task, &RepositoryUri::from(URI), "beekeeper", "us-east-1");

    let revision = aws
        .register_task_definition(&task, "bridge", &definition)
        .expect("register");
    assert_eq!(revision, Revision(7));

    let calls = read_log(&log);
    assert!(calls.contains("--family worker1 --network-mode bridge --container-definitions [{"));
    assert!(calls.contains("\"awslogs-stream-prefix\":\"worker1\""));
}

#[test]
fn register_with_garbage_output_is_a_response_error() {
    let dir = TempDir::new().unwrap();
    let (script, _log) = fake_aws(&dir, "  'ecs register-task-definition') echo 'not json' ;;");
    let aws = AwsCli::new(script, settings());
    let task = TaskName::parse("worker1").unwrap();
    let definition =
        TaskDefinition::skeleton(&task, &RepositoryUri::from(URI), "beekeeper", "us-east-1");

    let err = aws
        .register_task_definition(&task, "bridge", &definition)
        .unwrap_err();
    assert!(matches!(err, OrchestrationError::Response { .. }), "got: {err}");
}
