//! # waggle-docker
//!
//! [`DockerCli`] implements image building and publishing by shelling out to
//! the `docker` command line (or anything argument-compatible, such as
//! `podman`). Build, tag and push inherit the terminal so their progress is
//! visible. Their exit status is only logged: a build that exits non-zero
//! does not stop the pipeline, a tool that cannot be started does. Registry
//! login is checked.

use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use waggle_core::{
    types::{ImageRef, RegistryLogin, RepositoryName},
    ImageBuilder, ImagePublisher, ToolError,
};

/// Docker-compatible image tool.
#[derive(Debug, Clone)]
pub struct DockerCli {
    program: PathBuf,
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new("docker")
    }
}

impl DockerCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command_line<S: AsRef<OsStr>>(&self, args: &[S]) -> String {
        let mut line = self.program.display().to_string();
        for arg in args {
            line.push(' ');
            line.push_str(&arg.as_ref().to_string_lossy());
        }
        line
    }

    /// Run with inherited stdio inside `cwd`. A non-zero exit is logged, not
    /// returned.
    fn run<S: AsRef<OsStr>>(&self, cwd: &Path, args: &[S]) -> Result<(), ToolError> {
        let command = self.command_line(args);
        tracing::debug!(cwd = %cwd.display(), %command, "running");

        let status = Command::new(&self.program)
            .args(args)
            .current_dir(cwd)
            .status()
            .map_err(|source| ToolError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if !status.success() {
            tracing::warn!(%command, %status, "command exited unsuccessfully");
        }
        Ok(())
    }
}

impl ImageBuilder for DockerCli {
    fn build(&self, context: &Path, image: &RepositoryName) -> Result<(), ToolError> {
        self.run(context, &["build", "-t", image.as_str(), "."])
    }
}

impl ImagePublisher for DockerCli {
    fn login(&self, login: &RegistryLogin) -> Result<(), ToolError> {
        let args = [
            "login",
            "--username",
            login.username.as_str(),
            "--password-stdin",
            login.endpoint.as_str(),
        ];
        let command = self.command_line(&args);
        tracing::debug!(%command, "running");

        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ToolError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(login.password.as_bytes())
                .map_err(|source| ToolError::Io {
                    command: command.clone(),
                    source,
                })?;
        }

        let output = child.wait_with_output().map_err(|source| ToolError::Io {
            command: command.clone(),
            source,
        })?;
        if output.status.success() {
            return Ok(());
        }
        Err(ToolError::Exit {
            command,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn tag(
        &self,
        context: &Path,
        source: &RepositoryName,
        target: &ImageRef,
    ) -> Result<(), ToolError> {
        self.run(context, &["tag", source.as_str(), target.as_str()])
    }

    fn push(&self, context: &Path, image: &ImageRef) -> Result<(), ToolError> {
        self.run(context, &["push", image.as_str()])
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
