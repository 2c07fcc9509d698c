//! Single source of truth for create-mn-app filesystem layout.
//!
//! This module defines WHERE data lives. It has no I/O beyond existence
//! checks and no business logic.
//!
//! # User-Level Paths (~/.create-mn-app/)
//!
//! ```text
//! ~/.create-mn-app/
//! ├── config.toml              # Optional user config
//! └── update-check.json        # Last release check (timestamp + version)
//! ```
//!
//! # Bundled Templates
//!
//! ```text
//! templates/
//! └── hello-world/             # One directory per bundled template
//! ```

use std::path::{Path, PathBuf};

/// Overrides the bundled templates root.
pub const TEMPLATES_ENV: &str = "CREATE_MN_APP_TEMPLATES";

// =============================================================================
// User Level (~/.create-mn-app/)
// =============================================================================

/// Tool home directory: `~/.create-mn-app/`
pub fn app_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".create-mn-app")
}

/// User config file: `~/.create-mn-app/config.toml`
pub fn config_path() -> PathBuf {
    app_home().join("config.toml")
}

/// Release check cache: `~/.create-mn-app/update-check.json`
pub fn update_check_path() -> PathBuf {
    app_home().join("update-check.json")
}

// =============================================================================
// Templates
// =============================================================================

/// Candidate roots for bundled templates, in lookup order.
///
/// `configured` is the `templates_dir` value from the user config, if any.
/// A non-empty `CREATE_MN_APP_TEMPLATES` replaces the whole chain.
fn template_roots(configured: Option<&Path>) -> Vec<PathBuf> {
    let env_override = std::env::var_os(TEMPLATES_ENV)
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from);
    template_roots_from(env_override, configured)
}

fn template_roots_from(env_override: Option<PathBuf>, configured: Option<&Path>) -> Vec<PathBuf> {
    if let Some(dir) = env_override {
        return vec![dir];
    }

    let mut roots = Vec::new();
    if let Some(dir) = configured {
        roots.push(dir.to_path_buf());
    }

    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir.join("templates"));
        roots.push(exe_dir.join("../share/create-mn-app/templates"));
    }

    roots.push(Path::new(env!("CARGO_MANIFEST_DIR")).join("templates"));
    roots
}

/// First root that ships `template`, if any.
pub fn templates_root(configured: Option<&Path>, template: &str) -> Option<PathBuf> {
    first_root_with(template_roots(configured), template)
}

fn first_root_with(roots: Vec<PathBuf>, template: &str) -> Option<PathBuf> {
    roots
        .into_iter()
        .find(|root| root.join(template).is_dir())
}
