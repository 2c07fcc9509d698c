//! Compact compiler version checks and self-update.

use anyhow::{bail, Context, Result};
use std::process::Command;

use crate::debug;
use crate::requirements::{self, COMPACT_INSTALL_COMMAND};
use crate::version;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompilerStatus {
    Missing,
    UpToDate { current: String },
    Outdated { current: String, required: String },
}

/// Installed compiler version, if the compiler answers with one
pub fn current_version() -> Option<String> {
    reported_version(requirements::check_compact_compiler().version.as_deref())
}

/// Only a real `x.y.z` counts; anything else means no usable compiler
fn reported_version(reported: Option<&str>) -> Option<String> {
    reported.and_then(version::extract_version)
}

/// Classify an installed version against `required`
pub fn classify(current: Option<&str>, required: &str) -> CompilerStatus {
    match current {
        None => CompilerStatus::Missing,
        Some(current) if version::needs_update(current, required) => CompilerStatus::Outdated {
            current: current.to_string(),
            required: required.to_string(),
        },
        Some(current) => CompilerStatus::UpToDate {
            current: current.to_string(),
        },
    }
}

pub fn status(required: &str) -> CompilerStatus {
    classify(current_version().as_deref(), required)
}

/// Run the official installer script, then return the freshly installed
/// version. Fails when the compiler still reports a version older than
/// `required`.
pub fn update(required: &str) -> Result<String> {
    debug::log(format!("sh -c \"{COMPACT_INSTALL_COMMAND}\""));

    let output = Command::new("sh")
        .args(["-c", COMPACT_INSTALL_COMMAND])
        .output()
        .context("Failed to run the Compact installer")?;

    if !output.status.success() {
        bail!(
            "Compact installer failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    verify_installed(current_version(), required)
}

fn verify_installed(installed: Option<String>, required: &str) -> Result<String> {
    let installed = installed
        .context("Compact installer finished but the compiler version could not be verified")?;
    if version::needs_update(&installed, required) {
        bail!(
            "Compact compiler is still at {installed} after the installer ran (required {required}); the version may need manual verification"
        );
    }
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(None, "0.25.0"), CompilerStatus::Missing);
        assert_eq!(
            classify(Some("0.24.0"), "0.25.0"),
            CompilerStatus::Outdated {
                current: "0.24.0".into(),
                required: "0.25.0".into()
            }
        );
        assert_eq!(
            classify(Some("0.25.0"), "0.25.0"),
            CompilerStatus::UpToDate {
                current: "0.25.0".into()
            }
        );
        assert_eq!(
            classify(Some("0.26.1"), "0.25.0"),
            CompilerStatus::UpToDate {
                current: "0.26.1".into()
            }
        );
    }

    #[test]
    fn test_unparseable_version_counts_as_missing() {
        assert_eq!(reported_version(Some("unknown")), None);
        assert_eq!(reported_version(Some("compact: subcommand not found")), None);
        assert_eq!(reported_version(None), None);
        assert_eq!(reported_version(Some("0.26.0")).as_deref(), Some("0.26.0"));
        assert_eq!(
            classify(reported_version(Some("unknown")).as_deref(), "0.25.0"),
            CompilerStatus::Missing
        );
    }

    #[test]
    fn test_install_that_leaves_an_old_compiler_fails() {
        let err = verify_installed(Some("0.20.0".into()), "0.25.0").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("0.20.0"));
        assert!(message.contains("manual verification"));
    }

    #[test]
    fn test_install_verification() {
        assert_eq!(verify_installed(Some("0.25.0".into()), "0.25.0").unwrap(), "0.25.0");
        assert_eq!(verify_installed(Some("0.26.1".into()), "0.25.0").unwrap(), "0.26.1");
        assert!(verify_installed(None, "0.25.0").is_err());
    }
}
