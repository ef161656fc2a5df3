//! Recording session shared by the recording adapters.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;

/// File name of the cassette written by a session.
pub const CASSETTE_FILE: &str = "pips.cassette.yaml";

/// One cassette recorder shared by every recording adapter, so shell and
/// filesystem interactions land in a single ordered cassette.
///
/// Cassettes are written to a timestamped directory below the root.
pub struct RecordingSession {
    /// Recorder shared by the adapters.
    pub recorder: Arc<Mutex<CassetteRecorder>>,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a session writing to `<root>/<timestamp>/pips.cassette.yaml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamped directory already exists or
    /// cannot be created.
    pub fn new(root: &Path) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S%.3f").to_string();
        let output_dir = root.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let recorder = CassetteRecorder::new(output_dir.join(CASSETTE_FILE), timestamp);
        Ok(Self { recorder: Arc::new(Mutex::new(recorder)), output_dir })
    }

    /// Directory the cassette is written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write the cassette to disk and return its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter still holds the recorder or the
    /// cassette cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapters still hold the recorder".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))?;
        Ok(self.output_dir)
    }
}
