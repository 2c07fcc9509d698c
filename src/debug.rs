//! Verbose diagnostics, switched on by `--verbose`.
//!
//! Output goes to stderr so it never mixes with generated content.

use colored::Colorize;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

pub fn enable() {
    DEBUG_ENABLED.store(true, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

/// Print a `[debug]` line when verbose mode is on
pub fn log(message: impl AsRef<str>) {
    if is_enabled() {
        eprintln!("{} {}", "[debug]".dimmed(), message.as_ref());
    }
}

/// Print a `[debug]` line followed by a pretty JSON payload
pub fn log_data<T: Serialize + ?Sized>(message: impl AsRef<str>, data: &T) {
    if !is_enabled() {
        return;
    }
    log(message);
    if let Ok(json) = serde_json::to_string_pretty(data) {
        eprintln!("{}", json.dimmed());
    }
}
