//! ANSI styling keyed by what the text means
//!
//! Styling is off when `NO_COLOR` is set or the target stream is not a
//! terminal. `CLICOLOR_FORCE` turns it on for any stream.

use std::env;
use std::io::{self, IsTerminal};

/// What a piece of text signals to the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Resolved, uploaded, written
    Good,
    /// Reported without metadata, nothing found
    Caution,
    /// Failed or dropped
    Bad,
    /// Secondary detail
    Muted,
}

impl Tone {
    fn sgr(self) -> &'static str {
        match self {
            Tone::Good => "32",
            Tone::Caution => "33",
            Tone::Bad => "31",
            Tone::Muted => "2",
        }
    }
}

/// Styling decision for one output stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Palette for status lines on stdout
    pub fn for_stdout() -> Self {
        Self::from_env(io::stdout().is_terminal(), env_flag)
    }

    /// Palette for error reports on stderr
    pub fn for_stderr() -> Self {
        Self::from_env(io::stderr().is_terminal(), env_flag)
    }

    /// Never style
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    /// Always style
    pub fn ansi() -> Self {
        Self { enabled: true }
    }

    fn from_env(is_terminal: bool, flag: impl Fn(&str) -> bool) -> Self {
        let enabled = if flag("NO_COLOR") {
            false
        } else if flag("CLICOLOR_FORCE") {
            true
        } else {
            is_terminal
        };
        Self { enabled }
    }

    /// Style `text` for its tone
    pub fn paint(&self, tone: Tone, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        format!("\x1b[{}m{}\x1b[0m", tone.sgr(), text)
    }
}

/// Set and non-empty
fn env_flag(name: &str) -> bool {
    env::var_os(name).is_some_and(|value| !value.is_empty())
}
