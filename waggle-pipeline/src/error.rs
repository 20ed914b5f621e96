//! Error types for waggle-pipeline.

use thiserror::Error;

use waggle_core::{
    DefinitionError, OrchestrationError, PathRejection, RegistryError, ToolError,
};

/// Failure of one task's pipeline. Caught at the task boundary; never aborts
/// the batch.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("image build failed: {0}")]
    Build(#[source] ToolError),

    #[error("repository lookup failed: {0}")]
    Repository(#[from] RegistryError),

    #[error("image tag failed: {0}")]
    Tag(#[source] ToolError),

    #[error("image push failed: {0}")]
    Push(#[source] ToolError),

    #[error("invalid task configuration: {0}")]
    Definition(#[from] DefinitionError),

    #[error("task registration failed: {0}")]
    Register(#[from] OrchestrationError),
}

impl PipelineError {
    /// Short name of the stage that failed.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Build(_) => "build",
            PipelineError::Repository(_) => "repository",
            PipelineError::Tag(_) => "tag",
            PipelineError::Push(_) => "push",
            PipelineError::Definition(_) => "configuration",
            PipelineError::Register(_) => "register",
        }
    }
}

/// Failures that stop a batch before any task runs.
#[derive(Debug, Error)]
pub enum BatchError {
    /// At least one directory argument is unusable.
    #[error(transparent)]
    Rejected(#[from] PathRejection),

    /// The working directory could not be determined.
    #[error("cannot determine working directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),

    /// No registry credentials could be obtained.
    #[error("registry authorization failed: {0}")]
    Authorization(#[source] RegistryError),

    /// The image tool rejected the registry credentials.
    #[error("registry login failed: {0}")]
    Login(#[source] ToolError),
}
