use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths;

/// User configuration for create-mn-app
///
/// Every key is optional; a missing file means defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Template used when `--template` is omitted and no prompt is possible
    pub default_template: Option<String>,
    /// Package manager used when no `--use-*` flag is given (npm, yarn, pnpm, bun)
    pub package_manager: Option<String>,
    /// Root directory holding bundled templates
    pub templates_dir: Option<PathBuf>,
    /// Check GitHub for newer releases (at most daily)
    pub update_check: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_template: None,
            package_manager: None,
            templates_dir: None,
            update_check: true,
        }
    }
}

impl Config {
    /// Load configuration from `~/.create-mn-app/config.toml`
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}
