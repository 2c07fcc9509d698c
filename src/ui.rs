//! Console presentation: stage spinners and status lines.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::debug;

/// A pipeline stage shown as a spinner until it resolves
pub struct Step {
    pb: ProgressBar,
}

impl Step {
    /// Start a spinner with `message`.
    ///
    /// In verbose mode the spinner is hidden so child-process and debug
    /// output stay readable.
    pub fn start(message: impl Into<String>) -> Self {
        let message = message.into();
        let pb = if debug::is_enabled() {
            debug::log(&message);
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("{spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.enable_steady_tick(Duration::from_millis(80));
            pb
        };
        pb.set_message(message);
        Self { pb }
    }

    pub fn succeed(self, message: impl AsRef<str>) {
        self.pb.finish_and_clear();
        success(message);
    }

    pub fn warn(self, message: impl AsRef<str>) {
        self.pb.finish_and_clear();
        warning(message);
    }

    pub fn fail(self, message: impl AsRef<str>) {
        self.pb.finish_and_clear();
        failure(message);
    }
}

pub fn success(message: impl AsRef<str>) {
    println!("{} {}", "✓".green().bold(), message.as_ref());
}

pub fn warning(message: impl AsRef<str>) {
    println!("{} {}", "⚠".yellow().bold(), message.as_ref());
}

pub fn failure(message: impl AsRef<str>) {
    eprintln!("{} {}", "✖".red().bold(), message.as_ref());
}

/// Horizontal rule used around the success banner
pub fn rule() -> String {
    "━".repeat(60)
}
