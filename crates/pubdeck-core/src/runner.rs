//! External package-manager invocation.
//!
//! Commands run through the host tool (`flutter pub ...`) with captured
//! output; a non-zero exit is an error carrying the tool's stderr.
//! Cancellation abandons the wait without killing the subprocess, so the
//! caller skips its follow-up manifest rewrite while the tool finishes
//! whatever it was doing on its own.

use crate::project::Project;
use std::fmt;
use std::future::Future;
use std::io;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;

/// Errors that can occur when running external commands.
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        source: io::Error,
    },

    #[error("`{command}` exited with status {status}:\n{stderr}")]
    Failed {
        command: String,
        status: i32,
        stderr: String,
    },

    #[error("`{command}` was cancelled")]
    Cancelled { command: String },

    #[error("empty script command")]
    EmptyCommand,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Captured output of a successful run.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// A `pub` subcommand to run through the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PubCommand {
    /// `pub get` - install everything in the manifest.
    Get,

    /// `pub add [packages...] [--dev]`.
    Add { packages: Vec<String>, dev: bool },

    /// `pub remove <package>`.
    Remove { package: String },

    /// `pub upgrade <package>`.
    Upgrade { package: String },
}

impl PubCommand {
    /// The argument vector passed to the tool.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::Get => vec!["pub".into(), "get".into()],
            Self::Add { packages, dev } => {
                let mut args = vec!["pub".into(), "add".into()];
                args.extend(packages.iter().cloned());
                if *dev {
                    args.push("--dev".into());
                }
                args
            }
            Self::Remove { package } => vec!["pub".into(), "remove".into(), package.clone()],
            Self::Upgrade { package } => vec!["pub".into(), "upgrade".into(), package.clone()],
        }
    }
}

impl fmt::Display for PubCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.args().join(" "))
    }
}

/// Runs `pub` commands through a configurable tool binary.
#[derive(Debug, Clone)]
pub struct PubRunner {
    tool: String,
}

impl PubRunner {
    #[must_use]
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }

    /// The tool binary this runner invokes.
    #[must_use]
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Run a pub command in the project root to completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the tool cannot be started or exits non-zero.
    pub async fn run(
        &self,
        project: &Project,
        command: &PubCommand,
    ) -> Result<CommandOutput, RunnerError> {
        self.run_cancellable(project, command, std::future::pending())
            .await
    }

    /// Run a pub command, racing it against `cancel`.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Cancelled`] if `cancel` completes first; the
    /// subprocess is left running.
    pub async fn run_cancellable(
        &self,
        project: &Project,
        command: &PubCommand,
        cancel: impl Future<Output = ()>,
    ) -> Result<CommandOutput, RunnerError> {
        let display = format!("{} {}", self.tool, command);
        let mut invocation = Command::new(&self.tool);
        invocation.args(command.args()).current_dir(&project.root);
        execute(invocation, display, cancel).await
    }
}

/// Run an arbitrary script command line in the project root.
///
/// The line is split on whitespace; no shell is involved.
///
/// # Errors
///
/// Returns an error for an empty line, a spawn failure, a non-zero exit,
/// or cancellation.
pub async fn run_script(
    project: &Project,
    command_line: &str,
    cancel: impl Future<Output = ()>,
) -> Result<CommandOutput, RunnerError> {
    let mut parts = command_line.split_whitespace();
    let Some(program) = parts.next() else {
        return Err(RunnerError::EmptyCommand);
    };

    let mut invocation = Command::new(program);
    invocation.args(parts).current_dir(&project.root);
    execute(invocation, command_line.to_string(), cancel).await
}

async fn execute(
    mut invocation: Command,
    command_display: String,
    cancel: impl Future<Output = ()>,
) -> Result<CommandOutput, RunnerError> {
    tracing::debug!(command = %command_display, "running external command");

    let child = invocation
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| RunnerError::Spawn {
            command: command_display.clone(),
            source,
        })?;

    let wait = child.wait_with_output();
    tokio::pin!(wait);
    tokio::pin!(cancel);

    let output = tokio::select! {
        result = &mut wait => result?,
        () = &mut cancel => {
            tracing::warn!(command = %command_display, "cancelled; subprocess left running");
            return Err(RunnerError::Cancelled { command: command_display });
        }
    };

    if !output.status.success() {
        return Err(RunnerError::Failed {
            command: command_display,
            status: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
