//! Invocation of the `aws` command line tool.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::de::DeserializeOwned;

use waggle_core::{AwsSettings, ToolError};

use crate::error::AwsCliError;

/// Marker the AWS CLI prints in front of a service error code.
const ERROR_MARKER: &str = "An error occurred (";

/// `aws` bound to one region and set of credentials.
#[derive(Debug, Clone)]
pub struct AwsCli {
    program: PathBuf,
    settings: AwsSettings,
}

impl AwsCli {
    pub fn new(program: impl Into<PathBuf>, settings: AwsSettings) -> Self {
        Self {
            program: program.into(),
            settings,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn region(&self) -> &str {
        &self.settings.region
    }

    /// Full argument vector for `aws <service> <command> <args…>`.
    pub(crate) fn argv(&self, service: &str, command: &str, args: &[&str]) -> Vec<String> {
        let mut argv = vec![service.to_string(), command.to_string()];
        argv.extend(args.iter().map(|a| a.to_string()));
        argv.extend([
            "--region".to_string(),
            self.settings.region.clone(),
            "--output".to_string(),
            "json".to_string(),
        ]);
        argv
    }

    /// Run `aws <service> <command> <args…>` and decode stdout as `T`.
    pub(crate) fn invoke<T: DeserializeOwned>(
        &self,
        service: &str,
        command: &str,
        args: &[&str],
    ) -> Result<T, AwsCliError> {
        let argv = self.argv(service, command, args);
        tracing::debug!(program = %self.program.display(), service, command, "invoking aws");

        let output = Command::new(&self.program)
            .args(&argv)
            .env("AWS_ACCESS_KEY_ID", &self.settings.access_key_id)
            .env("AWS_SECRET_ACCESS_KEY", &self.settings.secret_access_key)
            .env("AWS_REGION", &self.settings.region)
            .env("AWS_DEFAULT_REGION", &self.settings.region)
            .env("AWS_PAGER", "")
            .env_remove("AWS_SESSION_TOKEN")
            .env_remove("AWS_PROFILE")
            .output()
            .map_err(|source| {
                AwsCliError::Tool(ToolError::Spawn {
                    program: self.program.display().to_string(),
                    source,
                })
            })?;

        if output.status.success() {
            return Ok(serde_json::from_slice(&output.stdout)?);
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        match parse_error_code(&stderr) {
            Some(code) => Err(AwsCliError::Api {
                code: Some(code),
                message: stderr,
            }),
            None => Err(AwsCliError::Tool(ToolError::Exit {
                command: format!("{} {service} {command}", self.program.display()),
                status: output.status.to_string(),
                stderr,
            })),
        }
    }
}

/// Extract `Code` from `An error occurred (Code) when calling …`.
pub fn parse_error_code(stderr: &str) -> Option<String> {
    let start = stderr.find(ERROR_MARKER)? + ERROR_MARKER.len();
    let rest = &stderr[start..];
    let end = rest.find(')')?;
    let code = rest[..end].trim();
    (!code.is_empty()).then(|| code.to_string())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
