//! Domain types for task registration.
//!
//! All path fields use `PathBuf`; image and repository references are
//! newtypes so a bare repository URI can never be pushed in place of a tagged
//! image reference.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Task names
// ---------------------------------------------------------------------------

/// Name of an ECS task, derived from the basename of its build directory.
///
/// Always non-empty and made only of ASCII letters, digits, `-` and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskName(String);

impl TaskName {
    /// Returns `true` when `name` matches `^[-_A-Za-z0-9]+$`.
    pub fn is_valid(name: &str) -> bool {
        !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    /// Parse a task name, returning `None` if it contains a forbidden character.
    pub fn parse(name: &str) -> Option<Self> {
        Self::is_valid(name).then(|| Self(name.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for TaskName {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if Self::is_valid(&s) {
            Ok(Self(s))
        } else {
            Err(format!("'{s}' is not a valid task name"))
        }
    }
}

impl From<TaskName> for String {
    fn from(name: TaskName) -> Self {
        name.0
    }
}

/// A validated build directory: the unit of work of a registration batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub name: TaskName,
    /// Absolute path to the Docker build context.
    pub source_path: PathBuf,
}

// ---------------------------------------------------------------------------
// Registry references
// ---------------------------------------------------------------------------

/// `"{namespace}/{task_name}"`: the ECR repository and local image name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub fn new(namespace: &str, task: &TaskName) -> Self {
        Self(format!("{namespace}/{task}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Fully qualified repository URI as reported by the registry,
/// e.g. `123456789012.dkr.ecr.us-east-1.amazonaws.com/beekeeper/worker`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryUri(String);

impl RepositoryUri {
    /// `"{uri}:{tag}"`
    pub fn with_tag(&self, tag: &str) -> ImageRef {
        ImageRef(format!("{}:{tag}", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepositoryUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RepositoryUri {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RepositoryUri {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A tagged image reference that can be pushed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Task definition revision assigned by ECS on registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Revision(pub u32);

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Credentials for `docker login` against the registry proxy endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct RegistryLogin {
    pub endpoint: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for RegistryLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryLogin")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
