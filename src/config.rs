//! Runtime configuration read from the environment.
//!
//! A `.env` file in the working directory is loaded first when present, so
//! any of the variables below can be set there.

use std::env;
use std::path::{Path, PathBuf};

/// Default primary manifest.
pub const REQUIREMENTS_PATH: &str = "requirements.txt";
/// Default development manifest.
pub const DEV_REQUIREMENTS_PATH: &str = "dev-requirements.txt";
/// Default interpreter used to run pip.
pub const DEFAULT_PYTHON: &str = "python";

/// Settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Interpreter that runs `-m pip` (`PIPS_PYTHON`).
    pub python: String,
    /// Primary manifest path (`PIPS_REQUIREMENTS`).
    pub requirements: PathBuf,
    /// Development manifest path (`PIPS_DEV_REQUIREMENTS`).
    pub dev_requirements: PathBuf,
    /// Directory to record port interactions into (`PIPS_RECORD`).
    pub record_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            python: DEFAULT_PYTHON.to_string(),
            requirements: PathBuf::from(REQUIREMENTS_PATH),
            dev_requirements: PathBuf::from(DEV_REQUIREMENTS_PATH),
            record_dir: None,
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the `PIPS_*` variables.
    #[must_use]
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded environment file");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup. Unset or empty
    /// variables fall back to the defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();
        Self {
            python: var("PIPS_PYTHON").unwrap_or(defaults.python),
            requirements: var("PIPS_REQUIREMENTS").map_or(defaults.requirements, PathBuf::from),
            dev_requirements: var("PIPS_DEV_REQUIREMENTS")
                .map_or(defaults.dev_requirements, PathBuf::from),
            record_dir: var("PIPS_RECORD").map(PathBuf::from),
        }
    }

    /// The manifest selected by the `--dev` flag.
    #[must_use]
    pub fn manifest(&self, dev: bool) -> &Path {
        if dev {
            &self.dev_requirements
        } else {
            &self.requirements
        }
    }
}
