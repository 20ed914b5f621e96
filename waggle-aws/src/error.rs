//! Error types for waggle-aws.

use thiserror::Error;

use waggle_core::{OrchestrationError, RegistryError, ToolError};

/// Failure of a single `aws` invocation.
#[derive(Debug, Error)]
pub enum AwsCliError {
    #[error(transparent)]
    Tool(ToolError),

    /// The service rejected the call; `code` is the API error code when the
    /// tool reported one (e.g. `RepositoryNotFoundException`).
    #[error("{message}")]
    Api {
        code: Option<String>,
        message: String,
    },

    /// Output on stdout was not the JSON document we expected.
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

impl AwsCliError {
    pub fn code(&self) -> Option<&str> {
        match self {
            AwsCliError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn into_registry_error(self, operation: &'static str) -> RegistryError {
        match self {
            AwsCliError::Tool(e) => RegistryError::Tool(e),
            AwsCliError::Api { code, message } => RegistryError::Api {
                operation,
                code,
                message,
            },
            AwsCliError::Json(e) => RegistryError::Response {
                operation,
                detail: e.to_string(),
            },
        }
    }

    pub(crate) fn into_orchestration_error(self, operation: &'static str) -> OrchestrationError {
        match self {
            AwsCliError::Tool(e) => OrchestrationError::Tool(e),
            AwsCliError::Api { code, message } => OrchestrationError::Api {
                operation,
                code,
                message,
            },
            AwsCliError::Json(e) => OrchestrationError::Response {
                operation,
                detail: e.to_string(),
            },
        }
    }
}
