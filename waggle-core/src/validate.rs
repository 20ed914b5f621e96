//! Classification of the directories passed to `register-task`.
//!
//! Each argument lands in exactly one bucket, checked in this order:
//!
//! 1. `bad_names`: the basename is not a valid [`TaskName`]
//! 2. `not_a_dir`: the name is fine but the path is not an existing directory
//! 3. `tasks`: everything else
//!
//! A batch only starts when both rejection buckets are empty; see
//! [`Classification::into_tasks`].
//!
//! The `_at` form takes the working directory explicitly and is what tests
//! call.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::types::{Task, TaskName};

/// Result of classifying every directory argument of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Valid tasks, in command-line order.
    pub tasks: Vec<Task>,
    /// Basenames that are not valid ECS task names.
    pub bad_names: Vec<String>,
    /// Valid names whose path is not an existing directory.
    pub not_a_dir: Vec<String>,
}

/// The batch was refused because at least one path is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "refusing to start: {} invalid task name(s), {} path(s) without a Docker configuration",
    bad_names.len(),
    not_a_dir.len()
)]
pub struct PathRejection {
    pub bad_names: Vec<String>,
    pub not_a_dir: Vec<String>,
}

impl Classification {
    /// `true` when no argument was rejected.
    pub fn is_clean(&self) -> bool {
        self.bad_names.is_empty() && self.not_a_dir.is_empty()
    }

    /// All-or-nothing gate: the valid tasks, or every rejection at once.
    pub fn into_tasks(self) -> Result<Vec<Task>, PathRejection> {
        if self.is_clean() {
            Ok(self.tasks)
        } else {
            Err(PathRejection {
                bad_names: self.bad_names,
                not_a_dir: self.not_a_dir,
            })
        }
    }
}

/// Classify `dirnames`, resolving relative paths against `cwd`.
pub fn classify_at<I, P>(cwd: &Path, dirnames: I) -> Classification
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut result = Classification::default();
    for dirname in dirnames {
        let full_path = absolutize(cwd, dirname.as_ref());
        let basename = full_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match TaskName::parse(&basename) {
            None => {
                let shown = if basename.is_empty() {
                    full_path.display().to_string()
                } else {
                    basename
                };
                result.bad_names.push(shown);
            }
            Some(_) if !full_path.is_dir() => result.not_a_dir.push(basename),
            Some(name) => result.tasks.push(Task {
                name,
                source_path: full_path,
            }),
        }
    }
    result
}

/// [`classify_at`] against the process working directory.
pub fn classify<I, P>(dirnames: I) -> std::io::Result<Classification>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let cwd = std::env::current_dir()?;
    Ok(classify_at(&cwd, dirnames))
}

/// Join `path` onto `cwd` and fold `.`/`..` lexically, without touching the
/// filesystem (symlinks are not resolved).
pub fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
