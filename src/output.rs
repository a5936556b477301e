//! # Output Configuration
//!
//! Controls CLI output appearance. Color state is a plain value threaded
//! explicitly through every component that prints, never a process-global
//! toggle.
//!
//! ## Respecting User Preferences
//!
//! The module respects the following environment variables and flags:
//! - `--no-color` - CLI flag that disables colors unconditionally
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;

use console::style;

/// Output configuration for controlling colored output.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether ANSI color should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from the environment and the
    /// `--no-color` CLI flag.
    ///
    /// The flag wins: when set, colors are off regardless of environment.
    /// Otherwise colors are detected from the environment and terminal.
    pub fn from_env_and_flag(no_color: bool) -> Self {
        let use_color = if no_color {
            false
        } else {
            Self::detect_color_support()
        };

        Self { use_color }
    }

    /// Detect whether color output is supported based on environment.
    fn detect_color_support() -> bool {
        // Check NO_COLOR first (https://no-color.org/)
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        // Check CLICOLOR=0 disables colors
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        // Check CLICOLOR_FORCE=1 forces colors
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        // Check TERM=dumb
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        // Use console crate's detection for TTY and color support
        console::Term::stdout().features().colors_supported()
    }

    /// Progress and informational text.
    pub fn info(&self, text: &str) -> String {
        if self.use_color {
            style(text).cyan().force_styling(true).to_string()
        } else {
            text.to_string()
        }
    }

    /// Success and completion text.
    pub fn ok(&self, text: &str) -> String {
        if self.use_color {
            style(text).green().force_styling(true).to_string()
        } else {
            text.to_string()
        }
    }

    /// Warning text (overwrites, force-clean notices).
    pub fn warn(&self, text: &str) -> String {
        if self.use_color {
            style(text).yellow().force_styling(true).to_string()
        } else {
            text.to_string()
        }
    }

    /// Error and missing-file text.
    pub fn error(&self, text: &str) -> String {
        if self.use_color {
            style(text).red().force_styling(true).to_string()
        } else {
            text.to_string()
        }
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag(false)
    }
}
