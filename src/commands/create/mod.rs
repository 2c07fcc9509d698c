//! Create a new Midnight project from a template
//!
//! This module follows the dependable-rust pattern:
//! - Public interface (this file): options, outcome and `execute`
//! - Internal implementation: all logic in internal/ submodules

mod internal;

use anyhow::Result;
use std::path::PathBuf;

use create_mn_app::config::Config;
use create_mn_app::installers::PackageManager;

pub use internal::prompt::is_interactive;

/// Choices collected from the command line
#[derive(Debug, Clone, Default)]
pub struct CreateAppOptions {
    /// Template name; `None` means config default, then a prompt
    pub template: Option<String>,
    /// Explicit `--use-*` choice
    pub package_manager: Option<PackageManager>,
    pub skip_install: bool,
    pub skip_git: bool,
    /// Whether prompts may be shown
    pub interactive: bool,
}

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct CreateOutcome {
    pub project_path: PathBuf,
    pub template: &'static str,
    pub package_manager: PackageManager,
    /// Non-fatal problems reported along the way
    pub warnings: Vec<String>,
}

/// Execute the create command
///
/// # Arguments
///
/// * `project_directory` - Target directory, relative to the current
///   directory. Prompted for when `None` and interactive.
/// * `options` - Template, package manager and skip flags
/// * `config` - User configuration (defaults for template and package manager)
///
/// # Process
///
/// 1. **Name**: Validates the directory's final component as a package name
/// 2. **Template**: Resolves and checks the template is available
/// 3. **Target**: Confirms overwriting an existing directory
/// 4. **Materialize**: Renders a bundled template, or clones a remote one
/// 5. **Wallet**: Writes `.env` with a fresh seed (bundled templates)
/// 6. **Install / Git / Tool checks**: Best effort, failures become warnings
/// 7. **Guide**: Prints next steps
///
/// # Errors
///
/// Returns an error if:
/// - The project name is invalid
/// - The template is unknown, not yet available, or cannot be copied
/// - The user cancels a prompt or declines to overwrite
/// - A directory is required but stdin is not interactive
pub fn execute(
    project_directory: Option<String>,
    options: CreateAppOptions,
    config: &Config,
) -> Result<CreateOutcome> {
    internal::execute_create(project_directory, options, config)
}
