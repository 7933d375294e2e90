//! Error message formatting with actionable suggestions.
//!
//! Renders the error, a `help:` line when there is a suggestion, and the
//! chain of underlying causes.

use depinfo_core::error::DepinfoError;
use super::colors::{Palette, Tone};
use std::error::Error;

/// Error formatter with suggestions
pub struct ErrorFormatter {
    palette: Palette,
}

impl ErrorFormatter {
    /// Formatter styled for stderr
    pub fn new() -> Self {
        Self::with_palette(Palette::for_stderr())
    }

    pub fn with_palette(palette: Palette) -> Self {
        Self { palette }
    }

    /// Format an error with context and suggestions
    pub fn format_error(&self, error: &DepinfoError) -> String {
        let mut output = String::new();

        // Main error message
        output.push_str(&self.palette.paint(Tone::Bad, "error"));
        output.push_str(": ");
        output.push_str(&error.to_string());
        output.push('\n');

        // Add suggestion if available
        if let Some(suggestion) = error.suggestion() {
            output.push('\n');
            output.push_str(&self.palette.paint(Tone::Muted, "help"));
            output.push_str(": ");
            output.push_str(suggestion);
            output.push('\n');
        }

        // Add source chain if available
        let mut source = error.source();
        while let Some(err) = source {
            output.push('\n');
            output.push_str(&self.palette.paint(Tone::Muted, "caused by"));
            output.push_str(": ");
            output.push_str(&err.to_string());
            source = err.source();
        }

        output
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}
