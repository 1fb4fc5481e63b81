//! External process invocation.
//!
//! Runs a helper tool to completion and captures everything it printed.

use std::process::ExitStatus;
use tokio::process::Command;

use crate::error::UtiError;

/// Captured result of a finished process.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// Runs `program` with `args`, waiting for it to exit.
///
/// Output is decoded as UTF-8, replacing invalid sequences.
///
/// # Errors
///
/// Returns [`UtiError::Spawn`] if the program could not be started.
pub async fn run(program: &str, args: &[String]) -> Result<CommandOutput, UtiError> {
    tracing::debug!(program, ?args, "running command");

    let output = Command::new(program)
        .args(args)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|source| UtiError::Spawn {
            program: program.to_string(),
            source,
        })?;

    Ok(CommandOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Runs `program` and returns its standard output.
///
/// # Errors
///
/// A launch failure or non-zero exit is an error carrying the captured
/// standard error.
pub async fn run_checked(program: &str, args: &[String]) -> Result<String, UtiError> {
    let output = run(program, args).await?;

    if !output.success() {
        return Err(UtiError::CommandFailed {
            program: program.to_string(),
            status: output.status.to_string(),
            stderr: output.stderr.trim().to_string(),
        });
    }

    Ok(output.stdout)
}
