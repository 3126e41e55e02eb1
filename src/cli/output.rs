//! Output helpers for CLI commands

use crate::project::ProjectError;

/// Output helper for consistent formatting
///
/// Status lines go to stdout, diagnostics to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    verbose: bool,
}

impl Output {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Prints a status line
    pub fn status(&self, message: &str) {
        println!("{}", message);
    }

    /// Prints a blank line
    pub fn blank(&self) {
        println!();
    }

    /// Prints a warning
    pub fn warn(&self, message: &str) {
        eprintln!("Warning: {}", message);
    }

    /// Prints an error message
    pub fn error(&self, message: &str) {
        eprintln!("Error: {}", message);
    }

    /// Prints a verbose debug message (only when --verbose is set)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }

    /// Prints a verbose debug message with context (only when --verbose is set)
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }
}

/// Prints an error returned by a command, with its remediation hint
pub fn report(err: &anyhow::Error) {
    let output = Output::default();
    output.error(&format!("{:#}", err));

    if let Some(hint) = hint_for(err) {
        eprintln!("{}", hint);
    }
}

/// Finds the remediation hint carried by any error in the chain
pub fn hint_for(err: &anyhow::Error) -> Option<String> {
    err.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<ProjectError>() {
            return e.hint().map(str::to_string);
        }
        if let Some(e) = cause.downcast_ref::<super::app::UsageError>() {
            return Some(e.usage_line());
        }
        if let Some(e) = cause.downcast_ref::<super::scaffold::ScaffoldError>() {
            return e.hint();
        }
        None
    })
}
