//! The per-task pipeline.
//!
//! 1. `docker build -t {namespace}/{task} .` in the task directory
//! 2. describe (or create) the ECR repository `{namespace}/{task}`
//! 3. tag the built image as `{uri}:{tag}`
//! 4. push `{uri}:{tag}`
//! 5. build the container definition (defaults + `ecs.json`)
//! 6. register it under family `{task}`
//!
//! The first failing step ends the task; the caller decides what happens to
//! the rest of the batch.

use std::fmt;

use waggle_core::{
    definition::{self, NETWORK_MODE},
    types::{ImageRef, RepositoryName, Revision, Task, TaskName},
    ImageBuilder, ImagePublisher, OrchestrationClient, RegistryClient,
};

use crate::error::PipelineError;
use crate::repository::resolve_repository;

/// The external collaborators a batch runs against.
#[derive(Clone, Copy)]
pub struct Backends<'a> {
    pub builder: &'a dyn ImageBuilder,
    pub publisher: &'a dyn ImagePublisher,
    pub registry: &'a dyn RegistryClient,
    pub orchestration: &'a dyn OrchestrationClient,
}

/// Parameters shared by every task of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchParams {
    pub namespace: String,
    pub tag: String,
    pub region: String,
}

/// A task that made it all the way through registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub task: TaskName,
    pub revision: Revision,
    pub image: ImageRef,
}

impl fmt::Display for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.task, self.revision)
    }
}

/// Run the full pipeline for one task.
pub fn publish_task(
    task: &Task,
    params: &BatchParams,
    backends: &Backends<'_>,
) -> Result<Registration, PipelineError> {
    let context = task.source_path.as_path();
    let repository = RepositoryName::new(&params.namespace, &task.name);
    tracing::info!(%repository, "registering as an ECS task");

    tracing::info!(%repository, "building local image");
    backends
        .builder
        .build(context, &repository)
        .map_err(PipelineError::Build)?;

    tracing::info!(%repository, "looking up ECR repository");
    let uri = resolve_repository(backends.registry, &repository)?;
    tracing::info!(%repository, %uri, "resolved ECR repository");

    let image = uri.with_tag(&params.tag);
    tracing::info!(%image, "tagging image for publication");
    backends
        .publisher
        .tag(context, &repository, &image)
        .map_err(PipelineError::Tag)?;

    tracing::info!(%image, "pushing image");
    backends
        .publisher
        .push(context, &image)
        .map_err(PipelineError::Push)?;

    let definition = definition::load(
        context,
        &task.name,
        &uri,
        &params.namespace,
        &params.region,
    )?;

    tracing::info!(family = %task.name, "registering task definition");
    let revision = backends
        .orchestration
        .register_task_definition(&task.name, NETWORK_MODE, &definition)?;
    tracing::info!(family = %task.name, %revision, "task registration complete");

    Ok(Registration {
        task: task.name.clone(),
        revision,
        image,
    })
}
