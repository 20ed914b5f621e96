//! Capability traits for the external collaborators of a registration.
//!
//! The pipeline only ever talks to these traits. Production implementations
//! shell out to `docker` (`waggle-docker`) and `aws` (`waggle-aws`); tests
//! substitute in-memory fakes.

use std::path::Path;

use thiserror::Error;

use crate::definition::TaskDefinition;
use crate::types::{ImageRef, RegistryLogin, RepositoryName, RepositoryUri, Revision, TaskName};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure of an external command.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The program could not be started at all (not installed, not executable).
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program started but feeding or reading its pipes failed.
    #[error("I/O error talking to `{command}`: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully.
    #[error("`{command}` exited with {status}{}", with_detail(.stderr))]
    Exit {
        command: String,
        status: String,
        stderr: String,
    },
}

fn with_detail(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

/// Errors from the container registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The registry reported that the repository does not exist.
    #[error("repository {0} does not exist")]
    RepositoryNotFound(RepositoryName),

    /// Any other error reported by the registry API.
    #[error("{operation} failed: {message}")]
    Api {
        operation: &'static str,
        code: Option<String>,
        message: String,
    },

    /// The registry answered with something we could not interpret.
    #[error("unexpected {operation} response: {detail}")]
    Response {
        operation: &'static str,
        detail: String,
    },

    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl RegistryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::RepositoryNotFound(_))
    }
}

/// Errors from the orchestration service.
#[derive(Debug, Error)]
pub enum OrchestrationError {
    #[error("{operation} failed: {message}")]
    Api {
        operation: &'static str,
        code: Option<String>,
        message: String,
    },

    #[error("unexpected {operation} response: {detail}")]
    Response {
        operation: &'static str,
        detail: String,
    },

    #[error(transparent)]
    Tool(#[from] ToolError),
}

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// Builds container images from a build context.
pub trait ImageBuilder {
    /// Build the image in `context` and tag it locally as `image`.
    fn build(&self, context: &Path, image: &RepositoryName) -> Result<(), ToolError>;
}

/// Tags and pushes images to a registry.
pub trait ImagePublisher {
    /// Authenticate against the registry endpoint in `login`.
    fn login(&self, login: &RegistryLogin) -> Result<(), ToolError>;

    /// Give the locally built `source` image the remote name `target`.
    fn tag(&self, context: &Path, source: &RepositoryName, target: &ImageRef)
        -> Result<(), ToolError>;

    fn push(&self, context: &Path, image: &ImageRef) -> Result<(), ToolError>;
}

/// Repository lookup and creation.
///
/// Implementations must report a missing repository as
/// [`RegistryError::RepositoryNotFound`] and nothing else; callers create the
/// repository only in that case.
pub trait RegistryClient {
    fn describe_repository(&self, name: &RepositoryName) -> Result<RepositoryUri, RegistryError>;

    fn create_repository(&self, name: &RepositoryName) -> Result<RepositoryUri, RegistryError>;

    /// Short-lived credentials for logging the image tool in.
    fn authorization(&self) -> Result<RegistryLogin, RegistryError>;
}

/// Task definition registration.
pub trait OrchestrationClient {
    /// Register `definition` as the single container of `family` and return
    /// the new revision.
    fn register_task_definition(
        &self,
        family: &TaskName,
        network_mode: &str,
        definition: &TaskDefinition,
    ) -> Result<Revision, OrchestrationError>;
}
