//! Installed-package inventory.
//!
//! Models the JSON report printed by `pip inspect` and indexes the
//! installed packages by normalized name.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::specifier::normalize;

/// Top-level `pip inspect` report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectReport {
    /// Report format version.
    pub version: String,
    /// Version of pip that produced the report.
    pub pip_version: String,
    /// Every installed distribution.
    pub installed: Vec<InstalledItem>,
    /// Interpreter and platform the report was taken on.
    pub environment: Environment,
}

/// One installed distribution in the report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InstalledItem {
    /// Core metadata of the distribution.
    pub metadata: Metadata,
    /// Path to the `.dist-info` directory.
    pub metadata_location: String,
    /// Tool that installed the distribution.
    pub installer: String,
    /// Whether the distribution was requested directly rather than as a dependency.
    pub requested: bool,
}

/// Core metadata fields of an installed distribution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct Metadata {
    pub metadata_version: String,
    pub name: String,
    pub version: String,
    pub summary: String,
    pub description: String,
    pub description_content_type: String,
    pub author: String,
    pub author_email: String,
    pub maintainer: String,
    pub maintainer_email: String,
    pub license: String,
    pub home_page: String,
    pub download_url: String,
    pub keywords: Vec<String>,
    pub classifier: Vec<String>,
    pub platform: Vec<String>,
    pub project_url: Vec<String>,
    pub provides_extra: Vec<String>,
    pub requires_dist: Vec<String>,
    pub requires_python: String,
}

/// Interpreter and platform descriptors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct Environment {
    pub implementation_name: String,
    pub implementation_version: String,
    pub os_name: String,
    pub platform_machine: String,
    pub platform_release: String,
    pub platform_system: String,
    pub platform_version: String,
    pub python_full_version: String,
    pub platform_python_implementation: String,
    pub python_version: String,
    pub sys_platform: String,
}

impl InspectReport {
    /// Decodes a report from the JSON text printed by `pip inspect`.
    ///
    /// # Errors
    ///
    /// Returns the decoder error if the text is not a valid report.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Installed packages keyed by normalized name.
#[derive(Debug, Clone, Default)]
pub struct InventoryIndex {
    items: HashMap<String, InstalledItem>,
}

impl InventoryIndex {
    /// Indexes items by normalized name. Later items replace earlier ones
    /// that normalize to the same name.
    #[must_use]
    pub fn build(items: impl IntoIterator<Item = InstalledItem>) -> Self {
        let items = items.into_iter().map(|item| (normalize(&item.metadata.name), item)).collect();
        Self { items }
    }

    /// Indexes the installed packages of a report.
    #[must_use]
    pub fn from_report(report: &InspectReport) -> Self {
        Self::build(report.installed.iter().cloned())
    }

    /// Looks up an installed package by normalized name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&InstalledItem> {
        self.items.get(name)
    }

    /// Number of indexed packages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing is installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = include_str!("../tests/fixtures/pip-inspect.json");

    fn item(name: &str, version: &str) -> InstalledItem {
        InstalledItem {
            metadata: Metadata {
                name: name.to_string(),
                version: version.to_string(),
                ..Metadata::default()
            },
            ..InstalledItem::default()
        }
    }

    #[test]
    fn decodes_pip_inspect_output() {
        let report = InspectReport::from_json(REPORT).unwrap();
        assert_eq!(report.installed[0].metadata.name, "starlette");
        assert_eq!(report.installed[0].metadata.provides_extra, vec!["full".to_string()]);
        assert_eq!(report.environment.sys_platform, "linux");
    }

    #[test]
    fn tolerates_missing_fields() {
        let report = InspectReport::from_json(r#"{"installed": [{"metadata": {"name": "x"}}]}"#)
            .unwrap();
        assert_eq!(report.installed[0].metadata.version, "");
        assert!(report.installed[0].metadata.provides_extra.is_empty());
    }

    #[test]
    fn index_keys_by_normalized_name() {
        let report = InspectReport::from_json(REPORT).unwrap();
        let index = InventoryIndex::from_report(&report);
        assert_eq!(index.len(), 3);
        assert_eq!(index.get("typing-extensions").unwrap().metadata.version, "4.5.0");
        assert!(index.get("Typing_Extensions").is_none());
    }

    #[test]
    fn later_items_win_on_collision() {
        let index = InventoryIndex::build([item("Foo.Bar", "1.0"), item("foo-bar", "2.0")]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("foo-bar").unwrap().metadata.version, "2.0");
    }

    #[test]
    fn missing_package_is_absent() {
        let index = InventoryIndex::build([item("starlette", "0.25.0")]);
        assert!(index.get("ezekiel").is_none());
        assert!(!index.is_empty());
    }
}
