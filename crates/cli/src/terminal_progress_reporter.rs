//! Terminal status lines
//!
//! Consistent prefixes and colors for the messages rcforge prints around its
//! tables. Emojis fall back to bracketed text on terminals without Unicode.
//!
//! Errors and warnings go to stderr so that stdout stays machine-readable,
//! which matters for `rc load` output that a shell evaluates.
//!
//! # Examples
//!
//! ```rust
//! use crate::terminal_progress_reporter::TerminalProgressReporter;
//!
//! let reporter = TerminalProgressReporter::new(true); // Enable colors
//! reporter.report_success("No conflicts in laptop/zsh");
//! reporter.report_error("Scripts directory not found");
//! ```

use std::fmt::Display;

use console::{Emoji, style};

// Define emojis with fallbacks for terminals that don't support Unicode
static ERROR_EMOJI: Emoji<'_, '_> = Emoji("❌ ", "[E] ");
static INFO_EMOJI: Emoji<'_, '_> = Emoji("ℹ️ ", "[I] ");
static SUGGESTION_EMOJI: Emoji<'_, '_> = Emoji("✨", "-> ");
static SUCCESS_EMOJI: Emoji<'_, '_> = Emoji("✅ ", "OK ");
static WARN_EMOJI: Emoji<'_, '_> = Emoji("⚠️ ", "[W] ");

/// Types of status messages that can be displayed to the user
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum MessageType {
    /// Error messages for failures and critical issues
    Error,
    /// Informational messages for general status updates
    Info,
    /// Success messages for completed operations
    Success,
    /// Helpful suggestions and recommendations
    Suggestion,
    /// Warning messages for potential issues
    Warning,
}

/// Terminal progress reporter for consistent CLI output formatting
#[derive(Debug, Clone, Copy)]
pub struct TerminalProgressReporter {
    /// Whether to use colored output (respects user preference and terminal capabilities)
    use_colors: bool,
}

impl TerminalProgressReporter {
    #[must_use]
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    #[must_use]
    pub(crate) fn use_colors(self) -> bool {
        self.use_colors
    }

    /// Format a status line with appropriate styling and prefix
    pub(crate) fn status_line(self, message_type: MessageType, message: impl Display) -> String {
        let prefix = match message_type {
            MessageType::Error => ERROR_EMOJI,
            MessageType::Info => INFO_EMOJI,
            MessageType::Success => SUCCESS_EMOJI,
            MessageType::Suggestion => SUGGESTION_EMOJI,
            MessageType::Warning => WARN_EMOJI,
        };

        let formatted_message = if self.use_colors {
            match message_type {
                MessageType::Error => style(message).for_stderr().red().bold().to_string(),
                MessageType::Info => style(message).blue().to_string(),
                MessageType::Success => style(message).green().to_string(),
                MessageType::Suggestion => {
                    return format!(
                        "{prefix} {}: {}",
                        style("Suggestion").yellow().bold(),
                        &message
                    );
                }
                MessageType::Warning => style(message).for_stderr().yellow().bold().to_string(),
            }
        } else {
            message.to_string()
        };

        format!("{prefix}{formatted_message}")
    }

    /// Format a message with the specified indentation
    pub(crate) fn format(indent: usize, message: impl Display) -> String {
        format!("{:indent$}{}", "", message, indent = indent)
    }

    pub(crate) fn format_error(self, message: impl Display) -> String {
        self.status_line(MessageType::Error, message)
    }

    pub(crate) fn format_info(self, message: impl Display) -> String {
        self.status_line(MessageType::Info, message)
    }

    pub(crate) fn format_suggestion(self, message: impl Display) -> String {
        self.status_line(MessageType::Suggestion, message)
    }

    pub(crate) fn format_success(self, message: impl Display) -> String {
        self.status_line(MessageType::Success, message)
    }

    pub(crate) fn format_warning(self, message: impl Display) -> String {
        self.status_line(MessageType::Warning, message)
    }

    pub(crate) fn report_success(self, message: impl Display) {
        println!("{}", self.format_success(message));
    }

    /// Print a formatted suggestion to stderr, alongside the error it follows
    pub(crate) fn report_suggestion(self, message: impl Display) {
        eprintln!("{}", self.format_suggestion(message));
    }

    pub(crate) fn report_info(self, message: impl Display) {
        println!("{}", self.format_info(message));
    }

    /// Print a formatted warning message to stderr
    pub(crate) fn report_warning(self, message: impl Display) {
        eprintln!("{}", self.format_warning(message));
    }

    /// Print a formatted error message to stderr
    ///
    /// Uses stderr for proper error stream handling in scripts and pipelines.
    pub(crate) fn report_error(self, message: impl Display) {
        eprintln!("{}", self.format_error(message));
    }
}
