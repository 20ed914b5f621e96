//! Batch orchestration: path gate, registry login, then every task in order.
//!
//! Path problems are collected up front and refuse the whole batch before any
//! side effect. Once tasks are running, a failure is recorded against its task
//! and the next one starts anyway.

use std::path::Path;

use waggle_core::{
    types::{Task, TaskName},
    validate,
};

use crate::error::{BatchError, PipelineError};
use crate::publish::{publish_task, Backends, BatchParams, Registration};

/// What happened to one attempted task.
#[derive(Debug)]
pub struct TaskOutcome {
    pub task: Task,
    pub result: Result<Registration, PipelineError>,
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of every attempted task, in command-line order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<TaskOutcome>,
}

impl BatchReport {
    /// Every task the batch started, whether or not it registered.
    pub fn attempted(&self) -> impl Iterator<Item = &TaskName> {
        self.outcomes.iter().map(|o| &o.task.name)
    }

    pub fn registrations(&self) -> impl Iterator<Item = &Registration> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Task, &PipelineError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.task, e)))
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(TaskOutcome::is_success)
    }
}

/// Log in once, then run the pipeline for each task.
pub fn run_batch(
    tasks: Vec<Task>,
    params: &BatchParams,
    backends: &Backends<'_>,
) -> Result<BatchReport, BatchError> {
    tracing::info!("logging in to ECR");
    let login = backends
        .registry
        .authorization()
        .map_err(BatchError::Authorization)?;
    backends.publisher.login(&login).map_err(BatchError::Login)?;

    let mut report = BatchReport::default();
    for task in tasks {
        let result = publish_task(&task, params, backends);
        if let Err(err) = &result {
            tracing::error!(
                path = %task.source_path.display(),
                kind = err.kind(),
                error = %err,
                "unable to prepare AWS task"
            );
        }
        report.outcomes.push(TaskOutcome { task, result });
    }
    Ok(report)
}

/// Classify `dirnames` against `cwd`, refuse the batch if any is unusable,
/// otherwise run it.
pub fn register_at<I, P>(
    cwd: &Path,
    dirnames: I,
    params: &BatchParams,
    backends: &Backends<'_>,
) -> Result<BatchReport, BatchError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let tasks = validate::classify_at(cwd, dirnames).into_tasks()?;
    run_batch(tasks, params, backends)
}

/// [`register_at`] against the process working directory.
pub fn register<I, P>(
    dirnames: I,
    params: &BatchParams,
    backends: &Backends<'_>,
) -> Result<BatchReport, BatchError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let cwd = std::env::current_dir().map_err(BatchError::WorkingDirectory)?;
    register_at(&cwd, dirnames, params, backends)
}
