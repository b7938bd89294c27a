//! Locating and loading `egret-lint.toml`.
//!
//! Lookup order, first hit wins:
//!
//! 1. `--config <FILE>`
//! 2. `egret-lint.toml`, then `.egret-lint.toml`, in the project directory
//! 3. `config.toml` in the global directory (`$EGRET_LINT_CONFIG_DIR`, else
//!    `~/.egret-lint/`)
//! 4. built-in defaults

use anyhow::{Context, Result};
use egret_lint_core::Config;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name `init` writes and project lookup tries first.
pub const PROJECT_CONFIG: &str = "egret-lint.toml";

const PROJECT_CONFIG_NAMES: [&str; 2] = [PROJECT_CONFIG, ".egret-lint.toml"];

const GLOBAL_CONFIG: &str = "config.toml";

/// Overrides the global config directory.
const CONFIG_DIR_ENV: &str = "EGRET_LINT_CONFIG_DIR";

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Found in the global directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Config file path, `None` for [`ConfigSource::Default`].
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Reads and parses the config file, or returns the defaults.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a valid config.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            debug!("No config file found, using defaults");
            return Ok(Config::default());
        };
        if matches!(self, Self::Global(_)) {
            info!("Using global config: {}", path.display());
        }
        Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Resolves the config for a project rooted at `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_with(project_dir, explicit, global_config_dir().as_deref())
}

fn resolve_with(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<&Path>,
) -> ConfigSource {
    // Trusted as given; a missing file surfaces when loading
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    if let Some(found) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.is_file())
    {
        debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    match global_dir.map(|dir| dir.join(GLOBAL_CONFIG)) {
        Some(found) if found.is_file() => {
            debug!("Found global config: {}", found.display());
            ConfigSource::Global(found)
        }
        _ => ConfigSource::Default,
    }
}

/// Global config directory: `$EGRET_LINT_CONFIG_DIR`, else `~/.egret-lint`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    std::env::var_os(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|home| home.join(".egret-lint")))
}
