//! Release check: tells the user when a newer create-mn-app is out.
//!
//! Runs at most once per [`CHECK_INTERVAL_HOURS`]; every failure is silent.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::debug;
use crate::paths;
use crate::version::{self, TOOL_VERSION};

pub const CHECK_INTERVAL_HOURS: i64 = 24;
pub const DISABLE_ENV: &str = "CREATE_MN_APP_NO_UPDATE_CHECK";
const RELEASES_URL: &str = "https://api.github.com/repos/midnightntwrk/create-mn-app/releases/latest";

#[derive(Deserialize)]
struct GitHubRelease {
    tag_name: String,
}

/// Result of the last release check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCache {
    pub last_checked: DateTime<Utc>,
    pub latest_version: Option<String>,
}

impl UpdateCache {
    pub fn load(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now - self.last_checked < Duration::hours(CHECK_INTERVAL_HOURS)
    }
}

/// Whether checks are switched off by config or environment
pub fn is_disabled(config: &Config) -> bool {
    !config.update_check
        || std::env::var_os(DISABLE_ENV).is_some()
        || std::env::var_os("CI").is_some()
}

/// Newer release than `current`, if the cached or fetched data says so
pub fn newer_version(current: &str, latest: Option<&str>) -> Option<String> {
    let latest = latest?.trim_start_matches('v');
    version::needs_update(current, latest).then(|| latest.to_string())
}

/// Check (or reuse the cached check) and print a notice when outdated
pub fn notify(config: &Config) {
    if is_disabled(config) {
        return;
    }

    let cache_path = paths::update_check_path();
    let now = Utc::now();

    let latest = match UpdateCache::load(&cache_path) {
        Some(cache) if cache.is_fresh(now) => cache.latest_version,
        _ => {
            let latest = match fetch_latest_release() {
                Ok(version) => Some(version),
                Err(e) => {
                    debug::log(format!("Release check failed: {e:#}"));
                    None
                }
            };
            let cache = UpdateCache {
                last_checked: now,
                latest_version: latest.clone(),
            };
            if let Err(e) = cache.save(&cache_path) {
                debug::log(format!("Could not save release check: {e:#}"));
            }
            latest
        }
    };

    if let Some(newer) = newer_version(TOOL_VERSION, latest.as_deref()) {
        println!();
        println!(
            "{} {} → {}",
            "Update available".yellow().bold(),
            TOOL_VERSION.dimmed(),
            newer.green()
        );
        println!(
            "Run {} to update",
            "cargo install create-mn-app".cyan()
        );
        println!();
    }
}

fn fetch_latest_release() -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(format!("create-mn-app/{TOOL_VERSION}"))
        .timeout(std::time::Duration::from_secs(3))
        .build()?;

    let response = client
        .get(RELEASES_URL)
        .header("Accept", "application/vnd.github.v3+json")
        .send()
        .context("Failed to connect to GitHub API")?
        .error_for_status()
        .context("GitHub API returned an error")?;

    let release: GitHubRelease = response
        .json()
        .context("Failed to parse GitHub release JSON")?;

    Ok(release.tag_name.trim_start_matches('v').to_string())
}
