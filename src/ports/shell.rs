//! Shell executor port for running external programs.

use serde::{Deserialize, Serialize};

/// The output of a captured program run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellOutput {
    /// The exit code of the process, `-1` when killed by a signal.
    pub exit_code: i32,
    /// The captured standard output.
    pub stdout: String,
    /// The captured standard error.
    pub stderr: String,
}

/// Executes external programs.
///
/// Programs are started directly with an argument vector; nothing is
/// interpreted by a shell.
pub trait ShellExecutor: Send + Sync {
    /// Runs a program with its output captured.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be spawned.
    fn run(
        &self,
        program: &str,
        args: &[String],
    ) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>>;

    /// Runs a program attached to the current terminal and returns its exit code.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be spawned.
    fn run_attached(
        &self,
        program: &str,
        args: &[String],
    ) -> Result<i32, Box<dyn std::error::Error + Send + Sync>>;
}
