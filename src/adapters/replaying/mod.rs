//! Replaying adapters that answer port calls from a cassette.

pub mod filesystem;
pub mod shell;

use std::sync::Mutex;

use crate::cassette::replayer::CassetteReplayer;

pub use filesystem::ReplayingFileSystem;
pub use shell::ReplayingShellExecutor;

/// Pull the next recorded output for a port/method pair.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    replayer.lock().expect("replayer lock poisoned").next_output(port, method)
}

/// Decode a recorded `{"ok": value}` / `{"err": message}` output.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: &serde_json::Value,
    context: &str,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(err) = output.get("err") {
        return Err(err.as_str().unwrap_or("unknown error").to_string().into());
    }
    let value = output.get("ok").unwrap_or(output);
    serde_json::from_value(value.clone())
        .map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}
