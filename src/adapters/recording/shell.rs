//! Recording adapter for the `ShellExecutor` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{ShellExecutor, ShellOutput};

/// Records shell interactions while delegating to an inner implementation.
pub struct RecordingShellExecutor {
    inner: Box<dyn ShellExecutor>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingShellExecutor {
    /// Creates a new recording shell executor wrapping the given implementation.
    pub fn new(inner: Box<dyn ShellExecutor>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct CommandInput<'a> {
    program: &'a str,
    args: &'a [String],
}

impl ShellExecutor for RecordingShellExecutor {
    fn run(
        &self,
        program: &str,
        args: &[String],
    ) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.run(program, args);
        record_result(&self.recorder, "shell", "run", &CommandInput { program, args }, &result);
        result
    }

    fn run_attached(
        &self,
        program: &str,
        args: &[String],
    ) -> Result<i32, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.run_attached(program, args);
        let input = CommandInput { program, args };
        record_result(&self.recorder, "shell", "run_attached", &input, &result);
        result
    }
}
