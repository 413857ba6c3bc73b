//! Configuration file resolution with global fallback.
//!
//! Resolves the configuration file path using a deterministic priority order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `cstyle.toml` or `.cstyle.toml` in the working directory
//! 3. `$CSTYLE_CONFIG`, else `~/.cstyle.toml` (global fallback)
//! 4. No config found → defaults

use anyhow::{Context, Result};
use cstyle_core::Config;
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the working directory.
    Project(PathBuf),
    /// The user's global configuration file.
    Global(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config was loaded from the global file.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["cstyle.toml", ".cstyle.toml"];

/// Config file name within the home directory.
const GLOBAL_CONFIG_NAME: &str = ".cstyle.toml";

/// Resolves the configuration file path.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    lookup(project_dir, explicit, global_config_file())
}

/// `global_file` is passed in so tests need not touch `$CSTYLE_CONFIG`.
/// An explicit path is taken as is; the others must exist.
fn lookup(project_dir: &Path, explicit: Option<&Path>, global_file: Option<PathBuf>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    let project = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|path| path.is_file());
    if let Some(path) = project {
        tracing::debug!("Found project config: {}", path.display());
        return ConfigSource::Project(path);
    }

    match global_file.filter(|path| path.is_file()) {
        Some(path) => {
            tracing::debug!("Found global config: {}", path.display());
            ConfigSource::Global(path)
        }
        None => ConfigSource::Default,
    }
}

/// Returns the global config file path.
///
/// Resolution: `$CSTYLE_CONFIG` > `~/.cstyle.toml`
#[must_use]
pub fn global_config_file() -> Option<PathBuf> {
    if let Ok(file) = std::env::var("CSTYLE_CONFIG") {
        return Some(PathBuf::from(file));
    }
    home::home_dir().map(|h| h.join(GLOBAL_CONFIG_NAME))
}

/// Loads the configuration a [`ConfigSource`] points at.
///
/// Without a source every option keeps its default and every kind matches
/// anything.
pub fn load(source: &ConfigSource) -> Result<Config> {
    match source {
        ConfigSource::Default => {
            tracing::debug!("No configuration found, using defaults");
            Ok(Config::default())
        }
        other => {
            // Invariant: non-Default variants always have a path
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_wins_even_when_missing() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("cstyle.toml"), "").unwrap();

        let explicit = Path::new("/nonexistent/naming.toml");
        assert_eq!(
            lookup(project.path(), Some(explicit), None),
            ConfigSource::Explicit(explicit.to_path_buf())
        );
    }

    #[test]
    fn dot_cstyle_toml_is_a_project_config() {
        let project = TempDir::new().unwrap();
        let path = project.path().join(".cstyle.toml");
        fs::write(&path, "[Rules]\nvar_decl = '[a-z_]+'\n").unwrap();

        assert_eq!(lookup(project.path(), None, None), ConfigSource::Project(path));
    }

    #[test]
    fn global_file_used_only_without_project_config() {
        let project = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();
        let global = home.path().join(".cstyle.toml");

        assert_eq!(
            lookup(project.path(), None, Some(global.clone())),
            ConfigSource::Default
        );

        fs::write(&global, "").unwrap();
        assert_eq!(
            lookup(project.path(), None, Some(global.clone())),
            ConfigSource::Global(global.clone())
        );

        fs::write(project.path().join("cstyle.toml"), "").unwrap();
        assert!(matches!(
            lookup(project.path(), None, Some(global)),
            ConfigSource::Project(_)
        ));
    }

    #[test]
    fn load_default_is_permissive() {
        let config = load(&ConfigSource::Default).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.rules.iter().all(|r| r.source() == ".*"));
    }

    #[test]
    fn load_reads_options_without_rules() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cstyle.toml");
        fs::write(&path, "[Options]\nprefer_goto = \"yes\"\n").unwrap();

        let config = load(&ConfigSource::Global(path)).unwrap();
        assert!(config.options.prefer_goto);
        assert!(config.rules.is_empty());
    }

    #[test]
    fn load_reports_unknown_kinds_with_the_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cstyle.toml");
        fs::write(&path, "[Rules]\nwidget_decl = '.*'\n").unwrap();

        let err = load(&ConfigSource::Explicit(path.clone())).unwrap_err();
        assert!(err.to_string().contains(&path.display().to_string()));
    }
}
