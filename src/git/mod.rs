//! Git plumbing for new projects
//!
//! Handles:
//! - Initial repository + commit for freshly scaffolded projects
//! - Shallow clones of remote templates, detached from their history

mod operations;

pub use operations::{add_all, clone_shallow, commit, init, is_available, run};

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit from create-mn-app";

/// `git init`, `git add .`, `git commit`; stops at the first failure
pub fn init_repository(project_path: &Path) -> Result<()> {
    if !is_available() {
        bail!("Git is not available");
    }

    init(project_path)?;
    add_all(project_path)?;
    commit(project_path, INITIAL_COMMIT_MESSAGE)?;
    Ok(())
}

/// Clone `owner/repo` from GitHub into `target` as a fresh project
/// (the clone's `.git` directory is removed)
pub fn clone_template(repo: &str, branch: &str, target: &Path) -> Result<()> {
    if !is_available() {
        bail!("Git is not installed. Please install Git from https://git-scm.com");
    }

    let url = format!("https://github.com/{repo}.git");
    clone_shallow(&url, branch, target).with_context(|| {
        format!(
            "Failed to clone repository {repo}. Please check your network connection and try again."
        )
    })?;

    let git_dir = target.join(".git");
    if git_dir.exists() {
        fs::remove_dir_all(&git_dir)
            .with_context(|| format!("Failed to remove {}", git_dir.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn configure_identity(path: &Path) {
        run(path, &["config", "user.name", "Test"]).unwrap();
        run(path, &["config", "user.email", "test@example.com"]).unwrap();
        run(path, &["config", "commit.gpgsign", "false"]).unwrap();
    }

    #[test]
    fn test_init_repository_commits_files() {
        if !is_available() {
            return;
        }
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("README.md"), "# demo\n").unwrap();

        // Identity must exist before the commit step; set it up front
        init(temp.path()).unwrap();
        configure_identity(temp.path());
        init_repository(temp.path()).unwrap();

        run(temp.path(), &["rev-parse", "--verify", "HEAD"]).unwrap();
    }

    #[test]
    fn test_shallow_clone_from_local_repo() {
        if !is_available() {
            return;
        }
        let temp = TempDir::new().unwrap();
        let origin = temp.path().join("origin");
        fs::create_dir_all(&origin).unwrap();
        init(&origin).unwrap();
        configure_identity(&origin);
        run(&origin, &["symbolic-ref", "HEAD", "refs/heads/main"]).unwrap();
        fs::write(origin.join("contract.compact"), "pragma;\n").unwrap();
        add_all(&origin).unwrap();
        commit(&origin, "seed").unwrap();

        let target = temp.path().join("copy");
        let url = format!("file://{}", origin.display());
        clone_shallow(&url, "main", &target).unwrap();

        assert!(target.join("contract.compact").exists());
        assert!(target.join(".git").exists());
    }
}
