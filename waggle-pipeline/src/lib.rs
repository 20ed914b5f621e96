//! # waggle-pipeline
//!
//! Build → resolve repository → tag → push → register, for every task of a
//! batch.
//!
//! Call [`batch::register_at`] with the raw directory arguments: it applies the
//! all-or-nothing path gate, logs in to the registry once, then runs
//! [`publish::publish_task`] for each task in order. A failing task never stops
//! its siblings; every outcome is returned in a [`BatchReport`].

pub mod batch;
pub mod error;
pub mod publish;
pub mod repository;

pub use batch::{register, register_at, run_batch, BatchReport, TaskOutcome};
pub use error::{BatchError, PipelineError};
pub use publish::{publish_task, Backends, BatchParams, Registration};

/// Namespace used for repositories and log groups when none is given.
pub const DEFAULT_NAMESPACE: &str = "beekeeper";

/// Image tag pushed when none is given.
pub const DEFAULT_TAG: &str = "latest";
