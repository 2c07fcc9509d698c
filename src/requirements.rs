//! Toolchain checks: Docker, the Compact compiler, git, Node.js.
//!
//! Every check shells out once and reports what it saw. Nothing here
//! installs or changes anything.

use colored::Colorize;
use serde::Serialize;
use std::process::Command;

use crate::version;

pub const COMPACT_INSTALL_COMMAND: &str = "curl --proto '=https' --tlsv1.2 -LsSf https://github.com/midnightntwrk/compact/releases/latest/download/compact-installer.sh | sh";
pub const DOCKER_INSTALL_URL: &str = "https://docs.docker.com/desktop/";
pub const GIT_INSTALL_URL: &str = "https://git-scm.com";
pub const NODE_INSTALL_URL: &str = "https://nodejs.org/";

/// Node.js major version the generated projects need
pub const MIN_NODE_MAJOR: u64 = 22;

/// Outcome of one check
#[derive(Debug, Clone, Serialize)]
pub struct RequirementCheck {
    pub name: String,
    pub required: bool,
    pub found: bool,
    pub version: Option<String>,
    pub install_url: Option<String>,
    pub install_command: Option<String>,
}

impl RequirementCheck {
    /// How to fix a missing requirement: install command and/or URL
    pub fn remediation(&self) -> Option<String> {
        match (&self.install_command, &self.install_url) {
            (Some(cmd), Some(url)) => Some(format!("{cmd} (see {url})")),
            (Some(cmd), None) => Some(cmd.clone()),
            (None, Some(url)) => Some(url.clone()),
            (None, None) => None,
        }
    }
}

/// Describes how to check one binary
#[derive(Debug, Clone)]
pub struct ToolCheck<'a> {
    pub name: &'a str,
    pub binary: &'a str,
    pub args: &'a [&'a str],
    pub required: bool,
    pub install_url: Option<&'a str>,
    pub install_command: Option<&'a str>,
}

impl ToolCheck<'_> {
    /// Run the binary and record whether it answered successfully
    pub fn run(&self) -> RequirementCheck {
        let version = if which::which(self.binary).is_ok() {
            query_version(self.binary, self.args)
        } else {
            None
        };

        RequirementCheck {
            name: self.name.to_string(),
            required: self.required,
            found: version.is_some(),
            version,
            install_url: self.install_url.map(str::to_string),
            install_command: self.install_command.map(str::to_string),
        }
    }
}

/// Run `binary args...`; on success return the parsed version, or the first
/// output line when no `x.y.z` is present.
fn query_version(binary: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(binary).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let text = if stdout.trim().is_empty() { stderr } else { stdout };

    version::extract_version(&text).or_else(|| {
        let line = text.lines().next().unwrap_or("").trim();
        Some(if line.is_empty() {
            "unknown".to_string()
        } else {
            line.to_string()
        })
    })
}

pub fn check_docker() -> RequirementCheck {
    ToolCheck {
        name: "Docker",
        binary: "docker",
        args: &["--version"],
        required: true,
        install_url: Some(DOCKER_INSTALL_URL),
        install_command: None,
    }
    .run()
}

pub fn check_compact_compiler() -> RequirementCheck {
    ToolCheck {
        name: "Compact Compiler",
        binary: "compact",
        args: &["compile", "--version"],
        required: true,
        install_url: None,
        install_command: Some(COMPACT_INSTALL_COMMAND),
    }
    .run()
}

pub fn check_git() -> RequirementCheck {
    ToolCheck {
        name: "Git",
        binary: "git",
        args: &["--version"],
        required: false,
        install_url: Some(GIT_INSTALL_URL),
        install_command: None,
    }
    .run()
}

/// Node.js is "found" only when its major version is at least `min_major`
pub fn check_node(min_major: u64) -> RequirementCheck {
    let mut check = ToolCheck {
        name: "Node.js",
        binary: "node",
        args: &["--version"],
        required: true,
        install_url: Some(NODE_INSTALL_URL),
        install_command: None,
    }
    .run();

    if let Some(ref found_version) = check.version {
        let major = found_version
            .split('.')
            .next()
            .and_then(|m| m.parse::<u64>().ok())
            .unwrap_or(0);
        check.found = major >= min_major;
    }
    check
}

/// Print a requirements table; returns true when everything was found
pub fn display_results(checks: &[RequirementCheck]) -> bool {
    println!("{}", format!("[{}] Requirements Check\n", "✓".cyan()).bold());

    for check in checks {
        let name = format!("{:<16}", check.name.to_lowercase());
        if check.found {
            let version = check.version.as_deref().unwrap_or("");
            println!(
                "    {} {} {}",
                name.dimmed(),
                version.dimmed(),
                "[installed]".green()
            );
        } else {
            println!("    {} {}", name.dimmed(), "[missing]".red());
        }
    }

    let missing: Vec<&RequirementCheck> = checks.iter().filter(|c| !c.found).collect();
    if missing.is_empty() {
        println!("{}", "\n    all dependencies satisfied\n".dimmed());
        return true;
    }

    println!();
    println!("{}", format!("[{}] Missing Dependencies\n", "!".yellow()).bold());
    for check in missing {
        println!("    {}:", check.name);
        if let Some(ref version) = check.version {
            println!("{}", format!("    found {version}, too old").dimmed());
        }
        if let Some(ref cmd) = check.install_command {
            println!("{}", format!("    $ {cmd}").dimmed());
        }
        if let Some(ref url) = check.install_url {
            println!("{}", format!("    → {url}").dimmed());
        }
        println!();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_binary_is_not_found() {
        let check = ToolCheck {
            name: "Nonexistent",
            binary: "definitely-not-a-real-binary-7f3a",
            args: &["--version"],
            required: true,
            install_url: Some("https://example.invalid/install"),
            install_command: None,
        }
        .run();

        assert!(!check.found);
        assert!(check.version.is_none());
        assert_eq!(
            check.remediation().as_deref(),
            Some("https://example.invalid/install")
        );
    }

    #[test]
    fn test_present_binary_reports_version() {
        // cargo exports its own path to the tests it runs
        let cargo = std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
        let check = ToolCheck {
            name: "Cargo",
            binary: &cargo,
            args: &["--version"],
            required: false,
            install_url: None,
            install_command: None,
        }
        .run();

        assert!(check.found);
        let version = check.version.unwrap();
        assert!(!version.is_empty());
        assert_eq!(version.split('.').count(), 3);
    }

    #[test]
    fn test_compiler_check_always_has_remediation() {
        let check = check_compact_compiler();
        assert_eq!(check.name, "Compact Compiler");
        assert_eq!(
            check.remediation().as_deref(),
            Some(COMPACT_INSTALL_COMMAND)
        );
    }

    #[test]
    fn test_remediation_combines_command_and_url() {
        let check = RequirementCheck {
            name: "Tool".into(),
            required: true,
            found: false,
            version: None,
            install_url: Some("https://tool.dev".into()),
            install_command: Some("brew install tool".into()),
        };
        assert_eq!(
            check.remediation().as_deref(),
            Some("brew install tool (see https://tool.dev)")
        );
    }

    #[test]
    fn test_display_results_reports_missing() {
        let checks = vec![
            RequirementCheck {
                name: "Docker".into(),
                required: true,
                found: true,
                version: Some("24.0.7".into()),
                install_url: Some(DOCKER_INSTALL_URL.into()),
                install_command: None,
            },
            RequirementCheck {
                name: "Compact Compiler".into(),
                required: true,
                found: false,
                version: None,
                install_url: None,
                install_command: Some(COMPACT_INSTALL_COMMAND.into()),
            },
        ];
        assert!(!display_results(&checks));
        assert!(display_results(&checks[..1]));
    }
}
