//! ANSI styling for status lines.
//!
//! Colors are only emitted when stderr is a terminal and `NO_COLOR` is unset.

use std::env;
use std::io::{self, IsTerminal};

/// Styles used by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Success,
    Warning,
    Failure,
    Muted,
    Strong,
}

impl Style {
    fn code(self) -> &'static str {
        match self {
            Style::Success => "32",
            Style::Warning => "33",
            Style::Failure => "31",
            Style::Muted => "2",
            Style::Strong => "1",
        }
    }
}

/// Whether styling is applied
#[derive(Debug, Clone, Copy)]
pub struct ColorSupport {
    enabled: bool,
}

impl ColorSupport {
    /// Detect from the environment
    pub fn detect() -> Self {
        let enabled = env::var_os("NO_COLOR").is_none() && io::stderr().is_terminal();
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn paint(&self, style: Style, text: &str) -> String {
        if self.enabled {
            format!("\x1b[{}m{}\x1b[0m", style.code(), text)
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_leaves_text_alone() {
        assert_eq!(ColorSupport::plain().paint(Style::Failure, "error"), "error");
    }

    #[test]
    fn test_enabled_wraps_text() {
        let colors = ColorSupport { enabled: true };
        assert_eq!(colors.paint(Style::Success, "ok"), "\x1b[32mok\x1b[0m");
    }
}
