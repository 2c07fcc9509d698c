//! Low-level git operations

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;

use crate::debug;

/// Check if git can be executed
pub fn is_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Run `git <args>` in `cwd`, failing on a non-zero exit
pub fn run(cwd: &Path, args: &[&str]) -> Result<()> {
    debug::log(format!("git {} (in {})", args.join(" "), cwd.display()));

    let output = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .with_context(|| format!("Failed to run git {}", args.join(" ")))?;

    if !output.status.success() {
        bail!(
            "Git command `git {}` failed with code {}: {}",
            args.join(" "),
            output
                .status
                .code()
                .map_or_else(|| "signal".to_string(), |c| c.to_string()),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(())
}

/// Initialize a repository
pub fn init(cwd: &Path) -> Result<()> {
    run(cwd, &["init"])
}

/// Stage everything in the working tree
pub fn add_all(cwd: &Path) -> Result<()> {
    run(cwd, &["add", "."])
}

/// Commit staged changes
pub fn commit(cwd: &Path, message: &str) -> Result<()> {
    run(cwd, &["commit", "-m", message])
}

/// Clone `url` at `branch` with depth 1 into `target`
pub fn clone_shallow(url: &str, branch: &str, target: &Path) -> Result<()> {
    let target_str = target.to_string_lossy();
    let parent = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    run(
        parent,
        &["clone", "--depth", "1", "--branch", branch, url, &target_str],
    )
}
