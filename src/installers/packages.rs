//! JavaScript package managers: selection, detection and invocation.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::process::Command;
use std::str::FromStr;

use crate::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManager {
    /// Detection order for lock files
    pub const ALL: [PackageManager; 4] = [Self::Npm, Self::Yarn, Self::Pnpm, Self::Bun];

    pub fn name(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
            Self::Bun => "bun",
        }
    }

    pub fn lock_file(self) -> &'static str {
        match self {
            Self::Npm => "package-lock.json",
            Self::Yarn => "yarn.lock",
            Self::Pnpm => "pnpm-lock.yaml",
            Self::Bun => "bun.lockb",
        }
    }

    /// Command line a user types to install dependencies
    pub fn install_command(self) -> &'static str {
        match self {
            Self::Npm => "npm install",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm install",
            Self::Bun => "bun install",
        }
    }

    /// Prefix a user types to run a package script
    pub fn run_command(self) -> &'static str {
        match self {
            Self::Npm => "npm run",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
            Self::Bun => "bun run",
        }
    }

    /// Arguments for running `script`
    pub fn run_args(self, script: &str) -> Vec<String> {
        match self {
            Self::Npm | Self::Bun => vec!["run".to_string(), script.to_string()],
            Self::Yarn | Self::Pnpm => vec![script.to_string()],
        }
    }

    pub fn is_available(self) -> bool {
        Command::new(self.name())
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PackageManager {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            "pnpm" => Ok(Self::Pnpm),
            "bun" => Ok(Self::Bun),
            other => bail!("Unknown package manager \"{other}\" (expected npm, yarn, pnpm or bun)"),
        }
    }
}

/// Package manager from lock files in `cwd` or its parent, then from a
/// `npm_config_user_agent` string. `None` when neither gives an answer.
pub fn detect_from(cwd: &Path, user_agent: Option<&str>) -> Option<PackageManager> {
    let dirs = std::iter::once(cwd).chain(cwd.parent());
    for dir in dirs {
        if let Some(pm) = PackageManager::ALL
            .into_iter()
            .find(|pm| dir.join(pm.lock_file()).exists())
        {
            return Some(pm);
        }
    }

    let agent = user_agent.unwrap_or("");
    [
        ("bun", PackageManager::Bun),
        ("pnpm", PackageManager::Pnpm),
        ("yarn", PackageManager::Yarn),
        ("npm", PackageManager::Npm),
    ]
    .into_iter()
    .find(|(marker, _)| agent.contains(marker))
    .map(|(_, pm)| pm)
}

/// Best package manager for `cwd`: lock files, user agent, then the first
/// of pnpm, yarn, bun found on PATH, then npm.
pub fn detect(cwd: &Path) -> PackageManager {
    let agent = std::env::var("npm_config_user_agent").ok();
    if let Some(pm) = detect_from(cwd, agent.as_deref()) {
        return pm;
    }

    [PackageManager::Pnpm, PackageManager::Yarn, PackageManager::Bun]
        .into_iter()
        .find(|pm| pm.is_available())
        .unwrap_or(PackageManager::Npm)
}

/// Runs package-manager commands inside a project
pub struct PackageInstaller {
    package_manager: PackageManager,
}

impl PackageInstaller {
    pub fn new(package_manager: PackageManager) -> Self {
        Self { package_manager }
    }

    /// `<pm> install`; the error carries the combined output on failure
    pub fn install(&self, project_path: &Path) -> Result<()> {
        self.run(project_path, &["install".to_string()], "Package installation")
    }

    /// Run a `package.json` script
    pub fn run_script(&self, project_path: &Path, script: &str) -> Result<()> {
        let args = self.package_manager.run_args(script);
        self.run(project_path, &args, &format!("Script \"{script}\""))
    }

    fn run(&self, project_path: &Path, args: &[String], what: &str) -> Result<()> {
        let pm = self.package_manager.name();
        debug::log(format!("{pm} {} (in {})", args.join(" "), project_path.display()));

        let output = Command::new(pm)
            .current_dir(project_path)
            .args(args)
            .output()
            .with_context(|| format!("Failed to run {pm}: command not found or not executable"))?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            bail!(
                "{what} failed with code {}:\n{}",
                output
                    .status
                    .code()
                    .map_or_else(|| "signal".to_string(), |c| c.to_string()),
                combined.trim_end()
            );
        }

        Ok(())
    }
}
