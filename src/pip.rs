//! Invocations of pip through the shell port.
//!
//! pip always runs as `<python> -m pip ...` so the interpreter picked by
//! configuration decides which environment is changed.

use thiserror::Error;

use crate::context::ServiceContext;
use crate::inventory::InspectReport;

/// Failure of a pip invocation.
#[derive(Debug, Error)]
pub enum PipError {
    /// The interpreter could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// Program that was started.
        program: String,
        /// Underlying spawn error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// pip ran and exited unsuccessfully.
    #[error("pip {subcommand} exited with status {code}{}", stderr_suffix(.stderr))]
    Failed {
        /// The pip subcommand, e.g. `install`.
        subcommand: String,
        /// Process exit code.
        code: i32,
        /// Captured standard error, empty when attached to the terminal.
        stderr: String,
    },
    /// `pip inspect` printed something that is not a report.
    #[error("could not decode pip inspect output: {0}")]
    Decode(#[from] serde_json::Error),
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

fn pip_args(subcommand: &str, rest: impl IntoIterator<Item = String>) -> Vec<String> {
    ["-m", "pip", subcommand].into_iter().map(String::from).chain(rest).collect()
}

fn run_attached(
    ctx: &ServiceContext,
    python: &str,
    subcommand: &str,
    rest: impl IntoIterator<Item = String>,
) -> Result<(), PipError> {
    let args = pip_args(subcommand, rest);
    tracing::debug!(program = python, ?args, "running pip");
    let code = ctx
        .shell
        .run_attached(python, &args)
        .map_err(|source| PipError::Spawn { program: python.to_string(), source })?;
    if code == 0 {
        Ok(())
    } else {
        Err(PipError::Failed { subcommand: subcommand.to_string(), code, stderr: String::new() })
    }
}

/// Runs `pip install` with the given arguments attached to the terminal.
///
/// # Errors
///
/// Returns an error if pip cannot be started or exits unsuccessfully.
pub fn install(
    ctx: &ServiceContext,
    python: &str,
    packages: &[String],
    extra: &[String],
) -> Result<(), PipError> {
    run_attached(ctx, python, "install", packages.iter().chain(extra).cloned())
}

/// Runs `pip uninstall` attached to the terminal. With `yes`, pip does not
/// ask for confirmation.
///
/// # Errors
///
/// Returns an error if pip cannot be started or exits unsuccessfully.
pub fn uninstall(
    ctx: &ServiceContext,
    python: &str,
    packages: &[String],
    yes: bool,
) -> Result<(), PipError> {
    let flag = yes.then(|| "-y".to_string());
    run_attached(ctx, python, "uninstall", flag.into_iter().chain(packages.iter().cloned()))
}

/// Runs `pip inspect` and decodes its report.
///
/// # Errors
///
/// Returns an error if pip cannot be started, exits unsuccessfully, or
/// prints an undecodable report.
pub fn inspect(ctx: &ServiceContext, python: &str) -> Result<InspectReport, PipError> {
    let args = pip_args("inspect", std::iter::empty());
    tracing::debug!(program = python, ?args, "running pip");
    let output = ctx
        .shell
        .run(python, &args)
        .map_err(|source| PipError::Spawn { program: python.to_string(), source })?;
    if output.exit_code != 0 {
        return Err(PipError::Failed {
            subcommand: "inspect".to_string(),
            code: output.exit_code,
            stderr: output.stderr,
        });
    }
    let report = InspectReport::from_json(&output.stdout)?;
    tracing::debug!(installed = report.installed.len(), "read pip inspect report");
    Ok(report)
}
