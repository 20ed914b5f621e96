//! Error types for waggle-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while assembling [`crate::AwsSettings`] at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is set neither in the process environment nor in `.env`.
    #[error("AWS environment variable {0} not found")]
    MissingVar(&'static str),

    /// The `.env` file exists but could not be read or parsed.
    #[error("failed to load {path}: {source}")]
    DotEnv {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// Errors raised while loading a task's `ecs.json` override document.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The override file exists but could not be read.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The override file is not valid JSON.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The override file is valid JSON but its top level is not an object.
    #[error("{path} must contain a JSON object at the top level")]
    NotAnObject { path: PathBuf },
}
