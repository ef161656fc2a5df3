//! Service context bundling the port trait objects.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::shell::LiveShellExecutor;
use crate::adapters::recording::filesystem::RecordingFileSystem;
use crate::adapters::recording::shell::RecordingShellExecutor;
use crate::adapters::replaying::{ReplayingFileSystem, ReplayingShellExecutor};
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::ports::filesystem::FileSystem;
use crate::ports::shell::ShellExecutor;

/// Bundles the port trait objects a command runs against.
///
/// Constructors wire up different adapter implementations (live,
/// recording, replaying).
pub struct ServiceContext {
    /// Executor for pip subprocesses.
    pub shell: Box<dyn ShellExecutor>,
    /// Filesystem for manifest I/O.
    pub fs: Box<dyn FileSystem>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(shell: Box<dyn ShellExecutor>, fs: Box<dyn FileSystem>) -> Self {
        Self { shell, fs }
    }

    /// Creates a live context with real adapters.
    #[must_use]
    pub fn live() -> Self {
        Self::new(Box::new(LiveShellExecutor), Box::new(LiveFileSystem))
    }

    /// Creates a context that records every interaction of the live adapters.
    ///
    /// Drop the context before calling [`RecordingSession::finish`].
    ///
    /// # Errors
    ///
    /// Returns an error if the recording directory cannot be created.
    pub fn recording_at(root: &Path) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(root)?;
        let ctx = Self::new(
            Box::new(RecordingShellExecutor::new(
                Box::new(LiveShellExecutor),
                Arc::clone(&session.recorder),
            )),
            Box::new(RecordingFileSystem::new(
                Box::new(LiveFileSystem),
                Arc::clone(&session.recorder),
            )),
        );
        Ok((ctx, session))
    }

    /// Creates a context whose ports are both served from one cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        Ok(Self::new(
            Box::new(ReplayingShellExecutor::new(CassetteReplayer::load(path)?)),
            Box::new(ReplayingFileSystem::new(CassetteReplayer::load(path)?)),
        ))
    }

    /// Creates a context that replays pip from a cassette but uses the real
    /// filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying_shell(path: &Path) -> Result<Self, String> {
        Ok(Self::new(
            Box::new(ReplayingShellExecutor::new(CassetteReplayer::load(path)?)),
            Box::new(LiveFileSystem),
        ))
    }
}
