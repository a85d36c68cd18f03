// ABOUTME: Blocking external command execution with captured output
// ABOUTME: Resolves executables on PATH and turns non-zero exits into RunError

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("{program} not found in PATH")]
    NotFound { program: String },

    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed: {}", .stderr.trim())]
    Failed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },
}

pub type Result<T> = std::result::Result<T, RunError>;

/// A program plus its arguments, ready to be handed to a [`CommandRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs an external command to completion and returns its stdout.
///
/// Implementations must treat a non-zero exit status as an error carrying
/// the command's stderr.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<String>;
}

/// [`CommandRunner`] backed by real child processes.
///
/// Commands run from the process working directory, which the git hooks set
/// to the root of the working tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }

    fn resolve(&self, program: &str) -> Result<PathBuf> {
        which::which(program).map_err(|_| RunError::NotFound {
            program: program.to_string(),
        })
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<String> {
        let program = self.resolve(invocation.program())?;
        debug!("Running command: {}", invocation);

        let mut command = Command::new(&program);
        command.args(invocation.arguments()).stdin(Stdio::null());

        let output = command.output().map_err(|source| RunError::Spawn {
            command: invocation.to_string(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            debug!(
                "Command `{}` exited with {:?}: {}",
                invocation,
                output.status.code(),
                stderr.trim()
            );
            return Err(RunError::Failed {
                command: invocation.to_string(),
                status: output.status.code(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
