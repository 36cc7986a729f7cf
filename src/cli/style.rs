//! Terminal styling helpers
//!
//! Colors are always emitted; `anstream::println!` strips them when the
//! output stream does not support color.

use indicatif::ProgressStyle;
use owo_colors::OwoColorize;
use std::fmt::Display;

/// Success mark
pub const CHECK: &str = "✓";
/// Failure mark
pub const CROSS: &str = "✗";
/// Unknown mark
pub const QUESTION: &str = "?";

/// Semantic colors for CLI output
pub trait Stylize {
    /// Secondary text
    fn muted(&self) -> String;
    /// Headings
    fn emphasis(&self) -> String;
    /// Names and counts
    fn accent(&self) -> String;
    /// Positive outcome
    fn success(&self) -> String;
    /// Needs attention
    fn warn(&self) -> String;
    /// Failure
    fn error(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    fn success(&self) -> String {
        self.green().to_string()
    }

    fn warn(&self) -> String {
        self.yellow().to_string()
    }

    fn error(&self) -> String {
        self.red().bold().to_string()
    }
}

/// Green check mark
pub fn check() -> String {
    CHECK.success()
}

/// Red cross
pub fn cross() -> String {
    CROSS.error()
}

/// Yellow question mark
pub fn question() -> String {
    QUESTION.warn()
}

/// Dimmed list arrow
pub fn arrow() -> String {
    "→".muted()
}

/// Spinner used while waiting on git
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "])
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}
