//! Terminal output.
//!
//! Rendered graphs and catalogs go to stdout, status lines go to stderr so
//! the former can be redirected on their own.

pub mod colors;
pub mod errors;

use colors::{ColorSupport, Style};

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    colors: ColorSupport,
}

impl OutputHandler {
    pub fn new() -> Self {
        Self {
            colors: ColorSupport::detect(),
        }
    }

    /// Print command output verbatim
    pub fn print(&self, content: &str) {
        print!("{}", content);
        if !content.ends_with('\n') {
            println!();
        }
    }

    pub fn info(&self, message: &str) {
        eprintln!("{}", self.colors.paint(Style::Muted, message));
    }

    pub fn success(&self, message: &str) {
        eprintln!("{} {}", self.colors.paint(Style::Success, "✓"), message);
    }

    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", self.colors.paint(Style::Warning, "⚠"), message);
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new()
    }
}
