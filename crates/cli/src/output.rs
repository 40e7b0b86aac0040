//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output. Status lines go to stderr
//! so that stdout carries only results.

use larder_core::Error;
use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        eprintln!("{} {}", "ℹ".blue(), message);
    }
}

/// Print a structured error with its context and suggestion
pub fn report_error(err: &Error) {
    Status::error(&format!("{} {}", err.code.dimmed(), err.message));
    if let Some(context) = &err.context {
        eprintln!("  {} {}", "context:".dimmed(), context);
    }
    if let Some(suggestion) = &err.suggestion {
        eprintln!("  {} {}", "hint:".cyan(), suggestion);
    }
}

/// Print a structured error as a single JSON line on stderr
pub fn report_error_json(err: &Error) {
    match serde_json::to_string(&err.to_report()) {
        Ok(json) => eprintln!("{}", json),
        Err(_) => report_error(err),
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
