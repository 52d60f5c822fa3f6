//! Error reports with hints.
//!
//! Ambiguities list every competing definition on its own line, and a cycle
//! names both packages involved, before the hint and the cause chain.

use std::error::Error;

use conflux_core::ConfluxError;

use super::colors::{ColorSupport, Style};

pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    pub fn new() -> Self {
        Self {
            colors: ColorSupport::detect(),
        }
    }

    pub fn with_colors(colors: ColorSupport) -> Self {
        Self { colors }
    }

    /// Format an error with details, a hint and its sources
    pub fn format_error(&self, error: &ConfluxError) -> String {
        let mut output = format!("{}: {}\n", self.colors.paint(Style::Failure, "error"), error);

        match error {
            ConfluxError::AmbiguousResolution { definitions, .. } => {
                for definition in definitions {
                    output.push_str(&format!("  {} {}\n", self.colors.paint(Style::Muted, "-"), definition));
                }
            },
            ConfluxError::CycleDetected { vertex, origin } => {
                output.push_str(&format!(
                    "  {} {} is required again below {}\n",
                    self.colors.paint(Style::Muted, "-->"),
                    self.colors.paint(Style::Strong, vertex),
                    origin
                ));
            },
            _ => {},
        }

        if let Some(suggestion) = error.suggestion() {
            output.push_str(&format!("{}: {}\n", self.colors.paint(Style::Muted, "help"), suggestion));
        }

        let mut source = error.source();
        while let Some(err) = source {
            output.push_str(&format!("{}: {}\n", self.colors.paint(Style::Muted, "caused by"), err));
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

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter() -> ErrorFormatter {
        ErrorFormatter::with_colors(ColorSupport::plain())
    }

    #[test]
    fn test_ambiguity_lists_definitions() {
        let err = ConfluxError::AmbiguousResolution {
            name: "zlib".to_string(),
            definitions: vec!["zlib/1.2 []".to_string(), "zlib/1.3 []".to_string()],
        };
        let report = formatter().format_error(&err);

        assert!(report.starts_with("error: Ambiguous resolution for 'zlib'"));
        assert!(report.contains("\n  - zlib/1.2 []\n  - zlib/1.3 []\n"));
        assert!(report.contains("help: Add an override"));
    }

    #[test]
    fn test_cycle_names_both_packages() {
        let err = ConfluxError::CycleDetected {
            vertex: "a".to_string(),
            origin: "c".to_string(),
        };
        let report = formatter().format_error(&err);
        assert!(report.contains("--> a is required again below c"));
    }

    #[test]
    fn test_io_error_shows_cause() {
        let err = ConfluxError::io(
            "Failed to read catalog missing.toml".to_string(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        let report = formatter().format_error(&err);

        assert!(report.contains("error: IO error: Failed to read catalog missing.toml"));
        assert!(report.contains("caused by: no such file"));
        assert!(!report.contains("help:"));
    }
}
