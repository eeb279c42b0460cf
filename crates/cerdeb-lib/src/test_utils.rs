//! Test helpers shared by the unit test modules.

use crate::codegen::Config;
use crate::diagnostics::Diagnostic;
use crate::parser::{StructParser, StructureDescriptor};
use crate::scanner::Scanner;
use crate::{Error, generate};

/// Parses the first annotated structure in `source`.
pub fn parse_first(source: &str) -> Result<StructureDescriptor, Diagnostic> {
    let mut scanner = Scanner::new(source);
    let annotation = scanner
        .next_annotation()?
        .unwrap_or_else(|| panic!("no annotation in {source:?}"));
    StructParser::new(scanner.tokens()).parse(&annotation)
}

pub fn expect_descriptor(source: &str) -> StructureDescriptor {
    parse_first(source).unwrap_or_else(|diag| panic!("expected a structure, got {diag}"))
}

pub fn expect_parse_error(source: &str) -> Diagnostic {
    match parse_first(source) {
        Ok(descriptor) => panic!("expected a parse error, got {descriptor:?}"),
        Err(diag) => diag,
    }
}

/// Whole-pipeline output with the default configuration.
pub fn expect_generated(source: &str) -> String {
    generate_with(source, &Config::default())
}

pub fn generate_with(source: &str, config: &Config) -> String {
    match generate(source, config) {
        Ok((generated, _)) => generated.text().into_owned(),
        Err(error) => panic!("expected generation to succeed, got {error}"),
    }
}

pub fn expect_generate_error(source: &str) -> Error {
    match generate(source, &Config::default()) {
        Ok((generated, _)) => panic!("expected an error, got:\n{}", generated.text()),
        Err(error) => error,
    }
}

/// Removes recorded insertions, newest first.
pub fn strip_insertions(buffer: &[u8], insertions: &[crate::splice::Insertion]) -> Vec<u8> {
    let mut out = buffer.to_vec();
    for insertion in insertions.iter().rev() {
        out.drain(insertion.offset..insertion.offset + insertion.len);
    }
    out
}
