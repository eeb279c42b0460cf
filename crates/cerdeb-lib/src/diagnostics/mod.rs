//! Diagnostics for scanning and parsing annotated declarations.
//!
//! Fatal problems travel inside [`crate::Error`]; non-fatal ones (warnings)
//! are collected into [`Diagnostics`] and returned next to a pass's output.

mod message;
mod printer;


pub use message::{Diagnostic, DiagnosticKind, RelatedInfo, Severity, Span};
pub use printer::DiagnosticsPrinter;

/// Diagnostics produced while processing one source.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    pub fn has_warnings(&self) -> bool {
        self.0.iter().any(|d| d.is_warning())
    }

    pub fn warning_count(&self) -> usize {
        self.0.iter().filter(|d| d.is_warning()).count()
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self(vec![diagnostic])
    }
}
