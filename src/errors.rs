//! Fatal error presentation and remediation hints.

use colored::Colorize;
use std::fmt;

/// The user declined a prompt or aborted input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Operation cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// True when the error chain contains a [`Cancelled`]
pub fn is_cancelled(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| cause.is::<Cancelled>())
}

/// `✖ Error (context)` header followed by the error chain
pub fn format_error(error: &anyhow::Error, context: Option<&str>) -> String {
    let mut message = "✖ Error".red().bold().to_string();
    if let Some(context) = context {
        message.push_str(&format!(" ({context})").red().to_string());
    }
    message.push_str("\n\n");
    message.push_str(&format!("{error:#}"));
    message.push('\n');
    message
}

/// Canned remediation hints keyed on keywords in the error text
pub fn suggestions(error_text: &str) -> &'static [&'static str] {
    let text = error_text.to_lowercase();

    if text.contains("eacces") || text.contains("permission") {
        &[
            "Check that you can write to the target directory",
            "Avoid running as root; fix ownership of the parent directory instead",
            "Fix npm permissions: https://docs.npmjs.com/resolving-eacces-permissions-errors",
        ]
    } else if text.contains("enoent") || text.contains("not found") {
        &[
            "Check if the file or command exists",
            "Verify your PATH environment variable",
            "Try reinstalling the required dependencies",
        ]
    } else if text.contains("network") || text.contains("timeout") {
        &[
            "Check your internet connection",
            "Try again in a few moments",
            "Check if the npm registry and GitHub are accessible",
        ]
    } else if text.contains("compile") || text.contains("syntax") {
        &[
            "Check for typos in your Compact contracts",
            "Verify contract syntax is valid",
            "Review Compact documentation",
        ]
    } else if text.contains("docker") {
        &[
            "Make sure Docker Desktop is running",
            "Install Docker from https://docker.com",
            "Check Docker service status",
        ]
    } else {
        &[
            "Check the error message above for details",
            "Try running with --verbose for more information",
            "Visit https://docs.midnight.network for help",
        ]
    }
}

/// Print the hint block for `error` to stderr
pub fn suggest_solution(error: &anyhow::Error) {
    eprintln!();
    eprintln!("{}", "💡 Possible Solutions:\n".yellow().bold());
    for hint in suggestions(&format!("{error:#}")) {
        eprintln!("{}", format!("   • {hint}").dimmed());
    }
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_cancelled_is_found_through_context() {
        let err = Err::<(), _>(Cancelled)
            .context("Project name prompt")
            .unwrap_err();
        assert!(is_cancelled(&err));
        assert!(!is_cancelled(&anyhow::anyhow!("boom")));
    }

    #[test]
    fn test_suggestions_by_keyword() {
        assert!(suggestions("EACCES: permission denied, mkdir")[0].contains("write"));
        assert!(suggestions("Template \"nope\" not found")[0].contains("exists"));
        assert!(suggestions("network timeout")[0].contains("internet"));
        assert!(suggestions("Compile failed")[0].contains("Compact"));
        assert!(suggestions("Docker daemon is down")[0].contains("Docker"));
        assert!(suggestions("something odd")[1].contains("--verbose"));
    }

    #[test]
    fn test_permission_wins_over_not_found() {
        // First matching keyword group decides
        let hints = suggestions("permission denied: file not found");
        assert!(hints[0].contains("write"));
    }

    #[test]
    fn test_format_error_includes_chain() {
        colored::control::set_override(false);
        let err = anyhow::anyhow!("disk full").context("Failed to copy template");
        let text = format_error(&err, Some("creating app"));
        assert!(text.starts_with("✖ Error (creating app)"));
        assert!(text.contains("Failed to copy template: disk full"));
    }
}
