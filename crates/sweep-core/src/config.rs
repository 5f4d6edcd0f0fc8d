//! Configuration management for sweep.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// User configuration, loaded from `<config_dir>/sweep/config.toml` and
/// overridable through environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Extra protection patterns (globs matched against short names).
    #[serde(default = "default_protected")]
    pub protected: Vec<String>,

    /// Ask for confirmation before deleting.
    #[serde(default = "default_interactive")]
    pub interactive: bool,

    /// Treat every clean as a dry run unless overridden.
    #[serde(default)]
    pub dry_run: bool,
}

impl Config {
    /// Load config from a TOML file.
    ///
    /// # Errors
    /// Returns error if file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config from the default user-level location, falling back to
    /// defaults when no config dir or file exists.
    ///
    /// # Errors
    /// Returns error if an existing file can't be read or parsed.
    pub fn load_default() -> Result<Self> {
        match default_path() {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Save config to a TOML file, creating parent directories.
    ///
    /// # Errors
    /// Returns error if serialization or write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| std::io::Error::other(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Apply environment-variable overrides, which take precedence over the
    /// file: `SWEEP_PROTECT` (comma-separated, replaces the list),
    /// `SWEEP_NO_CONFIRM`, and `SWEEP_DRY_RUN` (truthy: 1/true/yes).
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(value) = get("SWEEP_PROTECT") {
            self.protected = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        if truthy(get("SWEEP_NO_CONFIRM")) {
            self.interactive = false;
        }
        if truthy(get("SWEEP_DRY_RUN")) {
            self.dry_run = true;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            protected: default_protected(),
            interactive: default_interactive(),
            dry_run: false,
        }
    }
}

/// Default location of the user config file.
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sweep").join("config.toml"))
}

fn truthy(value: Option<String>) -> bool {
    value.is_some_and(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
}

fn default_protected() -> Vec<String> {
    vec!["master".into(), "develop".into()]
}

const fn default_interactive() -> bool {
    true
}
