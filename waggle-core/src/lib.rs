//! Waggle core library: domain types, path validation, settings, task
//! definitions and the capability traits the pipeline drives.
//!
//! - [`types`]: newtypes for task names, repositories and image references
//! - [`validate`]: classifies the directories passed on the command line
//! - [`settings`]: AWS credentials and region, with `.env` seeding
//! - [`definition`]: default task definition + `ecs.json` overrides
//! - [`backend`]: `ImageBuilder` / `ImagePublisher` / `RegistryClient` /
//!   `OrchestrationClient`

pub mod backend;
pub mod definition;
pub mod error;
pub mod settings;
pub mod types;
pub mod validate;

pub use backend::{
    ImageBuilder, ImagePublisher, OrchestrationClient, OrchestrationError, RegistryClient,
    RegistryError, ToolError,
};
pub use definition::TaskDefinition;
pub use error::{ConfigError, DefinitionError};
pub use settings::AwsSettings;
pub use types::{
    ImageRef, RegistryLogin, RepositoryName, RepositoryUri, Revision, Task, TaskName,
};
pub use validate::{Classification, PathRejection};
