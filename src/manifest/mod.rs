//! Requirements manifest reconciliation.
//!
//! A manifest is a plain-text file with one `name[extras]==version` line per
//! package. Saving appends lines for newly installed packages; removing
//! rewrites the file without the lines of uninstalled packages. Lines that
//! do not belong to the requested packages are never altered.

pub mod reconcile;
pub mod request;

use std::path::PathBuf;

use thiserror::Error;

pub use reconcile::{remove_packages, save_packages};
pub use request::RequestSet;

/// A single failure while reconciling a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The package is not in the installed inventory.
    #[error("package {0} not found")]
    NotFound(String),
    /// The manifest already has a line for the package.
    #[error("package {0} duplicate found")]
    Duplicate(String),
    /// The manifest does not exist.
    #[error("{} does not exist", .0.display())]
    Missing(PathBuf),
    /// The manifest could not be read.
    #[error("could not read {}: {source}", .path.display())]
    Read {
        /// Manifest path.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The manifest could not be written.
    #[error("could not update {}: {source}", .path.display())]
    Write {
        /// Manifest path.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Every failure of one reconciliation, reported together.
///
/// Packages that succeeded are already persisted when this is returned.
#[derive(Debug, Error)]
#[error("{}", join_lines(.0))]
pub struct ReconcileError(pub Vec<ManifestError>);

impl ReconcileError {
    /// The individual failures.
    #[must_use]
    pub fn failures(&self) -> &[ManifestError] {
        &self.0
    }
}

impl From<ManifestError> for ReconcileError {
    fn from(err: ManifestError) -> Self {
        Self(vec![err])
    }
}

fn join_lines(errors: &[ManifestError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregated_error_lists_every_failure() {
        let err = ReconcileError(vec![
            ManifestError::NotFound("ezekiel".into()),
            ManifestError::Duplicate("starlette".into()),
        ]);
        assert_eq!(err.to_string(), "package ezekiel not found\npackage starlette duplicate found");
        assert_eq!(err.failures().len(), 2);
    }
}
