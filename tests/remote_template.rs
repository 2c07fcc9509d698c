//! Remote template flow with stand-in `git` and `compact` executables
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const GIT_CLONES: &str = r#"#!/bin/sh
case "$1" in
  --version) echo "git version 2.43.0" ;;
  clone)
    for target; do :; done
    mkdir -p "$target/contract"
    echo "pragma language_version >= 0.16;" > "$target/contract/counter.compact"
    mkdir -p "$target/.git"
    ;;
  *) exit 1 ;;
esac
"#;

const GIT_OFFLINE: &str = r#"#!/bin/sh
case "$1" in
  --version) echo "git version 2.43.0" ;;
  *) echo "fatal: unable to access 'https://github.com/': Could not resolve host" >&2; exit 128 ;;
esac
"#;

const COMPACT_OLD: &str = "#!/bin/sh\necho \"compact 0.20.0\"\n";

fn install_tool(bin: &Path, name: &str, script: &str) {
    let path = bin.join(name);
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Run the binary with `bin` ahead of the system tool directories
fn run_cli(cwd: &Path, bin: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_create-mn-app"))
        .current_dir(cwd)
        .args(args)
        .env("PATH", format!("{}:/usr/bin:/bin", bin.display()))
        .env("HOME", cwd)
        .env("CREATE_MN_APP_NO_UPDATE_CHECK", "1")
        .env("NO_COLOR", "1")
        .stdin(Stdio::null())
        .output()
        .expect("Failed to run create-mn-app")
}

fn setup(git: &str, compact: Option<&str>) -> (TempDir, std::path::PathBuf) {
    let temp = TempDir::new().unwrap();
    let bin = temp.path().join("bin");
    fs::create_dir(&bin).unwrap();
    install_tool(&bin, "git", git);
    if let Some(script) = compact {
        install_tool(&bin, "compact", script);
    }
    (temp, bin)
}

#[test]
fn test_outdated_compiler_warns_and_clone_proceeds() {
    let (temp, bin) = setup(GIT_CLONES, Some(COMPACT_OLD));
    let output = run_cli(temp.path(), &bin, &["my-counter", "-t", "counter", "--skip-git"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Compact compiler 0.20.0 is older than the required 0.25.0"));
    assert!(stdout.contains("compact-installer.sh"));
    assert!(stdout.contains("Setup Instructions"));

    let project = temp.path().join("my-counter");
    assert!(project.join("contract/counter.compact").exists());
    assert!(!project.join(".git").exists());
    assert!(!project.join(".env").exists());
}

#[test]
fn test_missing_compiler_warns_and_clone_proceeds() {
    let (temp, bin) = setup(GIT_CLONES, None);
    let output = run_cli(temp.path(), &bin, &["my-counter", "-t", "counter", "--skip-git"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Compact compiler not found"));
    assert!(stdout.contains("Install it manually with:"));
    assert!(temp.path().join("my-counter/contract/counter.compact").exists());
}

#[test]
fn test_clone_failure_is_fatal() {
    let (temp, bin) = setup(GIT_OFFLINE, Some(COMPACT_OLD));
    let output = run_cli(temp.path(), &bin, &["my-counter", "-t", "counter", "--skip-git"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to clone repository midnightntwrk/example-counter"));
    assert!(stderr.contains("Check your internet connection"));
}
