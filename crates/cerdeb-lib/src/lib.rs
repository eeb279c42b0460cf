//! cerdeb: debug-print generator for annotated C structures.
//!
//! A `!debug` line in front of `typedef struct { ... } Name;` gets commented
//! out, and a `char *debug_print_Name(const Name *)` function is spliced in
//! right after the declaration.
//!
//! - `lexer` - token source for C text
//! - `scanner` - finds annotations at brace depth zero
//! - `classify` - field type → `printf` family
//! - `parser` - annotated declaration → [`StructureDescriptor`]
//! - `codegen` - descriptor → C function text
//! - `splice` - offset-adjusted insertion into the source buffer
//! - `pipeline` - the above over one in-memory source
//! - `driver` - the pipeline over files on disk
//! - `diagnostics` - error reporting

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod classify;
pub mod codegen;
pub mod diagnostics;
pub mod driver;
pub mod lexer;
pub mod parser;
pub mod pipeline;
pub mod scanner;
pub mod splice;

mod invariants;

#[cfg(test)]
mod pipeline_tests;
#[cfg(test)]
mod scanner_tests;
#[cfg(test)]
pub mod test_utils;

pub use classify::FormatFamily;
pub use codegen::{BufferStrategy, Config};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity, Span};
pub use driver::{DriverConfig, DriverError, FileOutput};
pub use parser::{Field, StructureDescriptor};
pub use pipeline::{Generated, generate, scan};

/// Result type for passes that produce both output and non-fatal diagnostics.
///
/// Fatal problems use the outer `Result`.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

/// Errors that abort processing of one source.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The token source could not classify the input.
    #[error("lexical error: {}", .0.message())]
    Lex(Diagnostic),

    /// An annotation is not followed by a supported declaration.
    #[error("malformed annotated structure: {}", .0.message())]
    StructureShape(Diagnostic),
}

impl Error {
    pub fn diagnostic(&self) -> &Diagnostic {
        match self {
            Error::Lex(diag) | Error::StructureShape(diag) => diag,
        }
    }

    /// Renders the underlying diagnostic with a source snippet.
    pub fn render(&self, source: &str, path: Option<&str>, colored: bool) -> String {
        let diagnostics = Diagnostics::from(self.diagnostic().clone());
        let mut printer = diagnostics.printer(source).colored(colored);
        if let Some(path) = path {
            printer = printer.path(path);
        }
        printer.render()
    }
}

impl From<Diagnostic> for Error {
    fn from(diag: Diagnostic) -> Self {
        if diag.kind().is_lexical() {
            Error::Lex(diag)
        } else {
            Error::StructureShape(diag)
        }
    }
}

/// Result type for single-source operations.
pub type Result<T> = std::result::Result<T, Error>;
