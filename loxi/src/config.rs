//! Configuration file support for the `lox` CLI (spec.md §6; SPEC_FULL.md's
//! "Configuration" ambient section).
//!
//! Flags override the config file, which overrides these defaults. The
//! file only carries the toggles spec.md §6 and §9 actually expose — Lox
//! has no project-level build configuration to speak of.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LoxiError, Result};

pub const CONFIG_FILE_NAME: &str = "lox.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// §9's "extra features" toggle.
    #[serde(default = "default_true")]
    pub extra_features: bool,

    /// Verbose (`debug`-level) logging.
    #[serde(default)]
    pub verbose: bool,

    /// TTY-conditional diagnostic coloring: `auto`, `always`, or `never`.
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_true() -> bool {
    true
}

fn default_color() -> String {
    "auto".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self { extra_features: true, verbose: false, color: default_color() }
    }
}

impl Config {
    /// Load from `dirs::config_dir()/lox/lox.toml`, or fall back to
    /// defaults if nothing is there.
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| LoxiError::Config(format!("failed to parse {}: {e}", path.display())))
    }

    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lox").join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.extra_features);
        assert!(!config.verbose);
        assert_eq!(config.color, "auto");
    }

    #[test]
    fn test_load_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("lox.toml");
        std::fs::write(&path, "extra_features = false\nverbose = true\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert!(!config.extra_features);
        assert!(config.verbose);
        assert_eq!(config.color, "auto");
    }

    #[test]
    fn test_load_from_nonexistent_path_is_an_error() {
        let result = Config::load_from_path(Path::new("/nonexistent/path/lox.toml"));
        assert!(result.is_err());
    }
}
