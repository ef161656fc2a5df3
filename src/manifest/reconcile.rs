//! Save and remove operations on a manifest file.

use std::collections::HashSet;
use std::fmt::Write;
use std::path::Path;

use super::{ManifestError, ReconcileError, RequestSet};
use crate::inventory::InventoryIndex;
use crate::ports::filesystem::FileSystem;
use crate::specifier::line_name;

/// Appends a pinned line for every requested package to the manifest.
///
/// Each line is `<name><extras>==<installed version>`, with the extras
/// exactly as requested. A package is skipped with a failure when it is not
/// installed or the manifest already names it; existing lines are never
/// rewritten. The manifest is created if absent.
///
/// # Errors
///
/// Returns every per-package failure together. Packages that succeeded are
/// persisted even when an error is returned.
pub fn save_packages(
    fs: &dyn FileSystem,
    path: &Path,
    index: &InventoryIndex,
    requests: &RequestSet,
) -> Result<(), ReconcileError> {
    let existing = if fs.exists(path) {
        fs.read_to_string(path)
            .map_err(|source| ManifestError::Read { path: path.to_path_buf(), source })?
    } else {
        String::new()
    };

    let present: HashSet<String> =
        existing.lines().filter_map(line_name).filter(|name| requests.contains(name)).collect();

    let mut failures = Vec::new();
    let mut appended = String::new();
    let mut saved = Vec::new();
    for (name, extras) in requests.iter() {
        let Some(item) = index.get(name) else {
            failures.push(ManifestError::NotFound(name.to_string()));
            continue;
        };
        if present.contains(name) {
            failures.push(ManifestError::Duplicate(name.to_string()));
            continue;
        }
        let _ = writeln!(appended, "{name}{extras}=={}", item.metadata.version);
        saved.push(name);
    }

    if !appended.is_empty() {
        let mut contents = existing;
        if !contents.is_empty() && !contents.ends_with('\n') {
            contents.push('\n');
        }
        contents.push_str(&appended);
        match fs.write(path, &contents) {
            Ok(()) => {
                for name in saved {
                    tracing::info!(package = name, manifest = %path.display(), "saved");
                }
            }
            Err(source) => {
                failures.push(ManifestError::Write { path: path.to_path_buf(), source });
            }
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(ReconcileError(failures))
    }
}

/// Rewrites the manifest without any line naming a requested package.
///
/// Retained lines keep their text and order. The file is replaced in one
/// write, and left untouched when no line matches or reading fails.
///
/// # Errors
///
/// Returns an error if the manifest is missing, unreadable or cannot be
/// written.
pub fn remove_packages(
    fs: &dyn FileSystem,
    path: &Path,
    requests: &RequestSet,
) -> Result<(), ReconcileError> {
    if !fs.exists(path) {
        return Err(ManifestError::Missing(path.to_path_buf()).into());
    }
    let existing = fs
        .read_to_string(path)
        .map_err(|source| ManifestError::Read { path: path.to_path_buf(), source })?;

    let mut retained = String::with_capacity(existing.len());
    let mut removed = Vec::new();
    for line in existing.lines() {
        match line_name(line) {
            Some(name) if requests.contains(&name) => removed.push(name),
            _ => {
                retained.push_str(line);
                retained.push('\n');
            }
        }
    }

    if removed.is_empty() {
        tracing::debug!(manifest = %path.display(), "no matching lines to remove");
        return Ok(());
    }

    fs.write(path, &retained)
        .map_err(|source| ManifestError::Write { path: path.to_path_buf(), source })?;
    for name in removed {
        tracing::info!(package = %name, manifest = %path.display(), "removed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;

    use super::*;
    use crate::inventory::{InspectReport, InstalledItem, Metadata};

    /// In-memory filesystem for exercising the reconciler without touching disk.
    #[derive(Default)]
    struct MemFs {
        files: Mutex<HashMap<PathBuf, String>>,
        fail_writes: bool,
    }

    impl MemFs {
        fn with(path: &str, contents: &str) -> Self {
            let fs = Self::default();
            fs.files.lock().unwrap().insert(PathBuf::from(path), contents.to_string());
            fs
        }

        fn contents(&self, path: &str) -> Option<String> {
            self.files.lock().unwrap().get(Path::new(path)).cloned()
        }
    }

    impl FileSystem for MemFs {
        fn read_to_string(
            &self,
            path: &Path,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            self.files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| format!("File not found: {}", path.display()).into())
        }

        fn write(
            &self,
            path: &Path,
            contents: &str,
        ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
            if self.fail_writes {
                return Err("disk full".into());
            }
            self.files.lock().unwrap().insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }
    }

    const MANIFEST: &str = "requirements.txt";

    fn index() -> InventoryIndex {
        let report =
            InspectReport::from_json(include_str!("../../tests/fixtures/pip-inspect.json"))
                .unwrap();
        InventoryIndex::from_report(&report)
    }

    fn requests(pairs: &[(&str, &str)]) -> RequestSet {
        pairs.iter().copied().collect()
    }

    fn save(fs: &MemFs, pairs: &[(&str, &str)]) -> Result<(), ReconcileError> {
        save_packages(fs, Path::new(MANIFEST), &index(), &requests(pairs))
    }

    fn remove(fs: &MemFs, pairs: &[(&str, &str)]) -> Result<(), ReconcileError> {
        remove_packages(fs, Path::new(MANIFEST), &requests(pairs))
    }

    #[test]
    fn saves_installed_package() {
        let fs = MemFs::default();
        save(&fs, &[("starlette", "")]).unwrap();
        assert_eq!(fs.contents(MANIFEST).unwrap(), "starlette==0.25.0\n");
    }

    #[test]
    fn saves_installed_package_with_extras() {
        let fs = MemFs::default();
        save(&fs, &[("starlette", "[full]")]).unwrap();
        assert_eq!(fs.contents(MANIFEST).unwrap(), "starlette[full]==0.25.0\n");
    }

    #[test]
    fn errors_if_package_is_not_installed() {
        let fs = MemFs::default();
        let err = save(&fs, &[("ezekiel", "")]).unwrap_err();
        assert!(matches!(err.failures(), [ManifestError::NotFound(name)] if name == "ezekiel"));
        assert_eq!(fs.contents(MANIFEST), None);
    }

    #[test]
    fn partial_success_persists_resolved_packages() {
        let fs = MemFs::default();
        let err = save(&fs, &[("ezekiel", ""), ("anyio", ""), ("typing-extensions", "")])
            .unwrap_err();
        assert_eq!(err.failures().len(), 1);
        assert_eq!(
            fs.contents(MANIFEST).unwrap(),
            "anyio==3.6.2\ntyping-extensions==4.5.0\n"
        );
    }

    #[test]
    fn saving_twice_reports_duplicate_and_leaves_file_unchanged() {
        let fs = MemFs::default();
        save(&fs, &[("starlette", "")]).unwrap();
        let err = save(&fs, &[("starlette", "[full]")]).unwrap_err();
        assert!(matches!(err.failures(), [ManifestError::Duplicate(name)] if name == "starlette"));
        assert_eq!(fs.contents(MANIFEST).unwrap(), "starlette==0.25.0\n");
    }

    #[test]
    fn duplicate_detection_uses_normalized_names() {
        let fs = MemFs::with(MANIFEST, "Typing_Extensions==4.0.0\n");
        let err = save(&fs, &[("typing-extensions", "")]).unwrap_err();
        assert!(matches!(err.failures(), [ManifestError::Duplicate(_)]));
    }

    #[test]
    fn appends_after_existing_lines() {
        let fs = MemFs::with(MANIFEST, "# web\nuvicorn==0.20.0");
        save(&fs, &[("anyio", "")]).unwrap();
        assert_eq!(fs.contents(MANIFEST).unwrap(), "# web\nuvicorn==0.20.0\nanyio==3.6.2\n");
    }

    #[test]
    fn write_failure_is_reported() {
        let fs = MemFs { fail_writes: true, ..MemFs::default() };
        let err = save(&fs, &[("starlette", "")]).unwrap_err();
        assert!(matches!(err.failures(), [ManifestError::Write { .. }]));
    }

    #[test]
    fn removes_matching_lines() {
        let fs = MemFs::with(MANIFEST, "a==1.0\nb==2.0\n");
        remove(&fs, &[("a", "")]).unwrap();
        assert_eq!(fs.contents(MANIFEST).unwrap(), "b==2.0\n");
    }

    #[test]
    fn removal_preserves_other_lines_verbatim() {
        let fs = MemFs::with(
            MANIFEST,
            "# deps\nZope.Interface==5.0\nStarlette[full]==0.25.0\n\nanyio\n",
        );
        remove(&fs, &[("starlette", "")]).unwrap();
        assert_eq!(fs.contents(MANIFEST).unwrap(), "# deps\nZope.Interface==5.0\n\nanyio\n");
    }

    #[test]
    fn removes_every_line_for_a_name() {
        let fs = MemFs::with(MANIFEST, "foo-bar==1\nkeep==2\nFoo_Bar[x]==3\n");
        remove(&fs, &[("foo-bar", "")]).unwrap();
        assert_eq!(fs.contents(MANIFEST).unwrap(), "keep==2\n");
    }

    #[test]
    fn removal_without_matches_leaves_file_alone() {
        let fs = MemFs::with(MANIFEST, "a==1.0");
        remove(&fs, &[("zzz", "")]).unwrap();
        assert_eq!(fs.contents(MANIFEST).unwrap(), "a==1.0");
    }

    #[test]
    fn removal_from_missing_manifest_fails() {
        let fs = MemFs::default();
        let err = remove(&fs, &[("a", "")]).unwrap_err();
        assert!(matches!(err.failures(), [ManifestError::Missing(_)]));
    }

    #[test]
    fn failed_rewrite_keeps_original_contents() {
        let fs = MemFs { fail_writes: true, ..MemFs::with(MANIFEST, "a==1.0\nb==2.0\n") };
        let err = remove(&fs, &[("a", "")]).unwrap_err();
        assert!(matches!(err.failures(), [ManifestError::Write { .. }]));
        assert_eq!(fs.contents(MANIFEST).unwrap(), "a==1.0\nb==2.0\n");
    }

    #[test]
    fn synthesized_extras_are_never_added() {
        let index = InventoryIndex::build([InstalledItem {
            metadata: Metadata {
                name: "pkg".into(),
                version: "1.0".into(),
                provides_extra: vec!["all".into()],
                ..Metadata::default()
            },
            ..InstalledItem::default()
        }]);
        let fs = MemFs::default();
        save_packages(&fs, Path::new(MANIFEST), &index, &requests(&[("pkg", "")])).unwrap();
        assert_eq!(fs.contents(MANIFEST).unwrap(), "pkg==1.0\n");
    }
}
