//! Scan → parse → generate → splice over one in-memory source.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::codegen::{self, Config};
use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Span};
use crate::invariants;
use crate::parser::{StructParser, StructureDescriptor};
use crate::scanner::Scanner;
use crate::splice::{Insertion, Patch, splice};
use crate::PassResult;

/// Spliced output of one source buffer.
#[derive(Debug, Clone)]
pub struct Generated {
    pub buffer: Vec<u8>,
    pub structures: Vec<StructureDescriptor>,
    pub insertions: Vec<Insertion>,
}

impl Generated {
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.buffer)
    }

    pub fn is_unchanged(&self) -> bool {
        self.insertions.is_empty()
    }
}

/// Collects every annotated structure in discovery order.
///
/// The first lexical or shape error aborts the scan. Structures annotated
/// twice under the same name are reported as warnings.
pub fn scan(source: &str) -> PassResult<Vec<StructureDescriptor>> {
    let mut scanner = Scanner::new(source);
    let mut structures: Vec<StructureDescriptor> = Vec::new();
    let mut diagnostics = Diagnostics::new();
    let mut first_seen: HashMap<String, Span> = HashMap::new();

    while let Some(annotation) = scanner.next_annotation()? {
        let descriptor = StructParser::new(scanner.tokens()).parse(&annotation)?;
        invariants::ensure_discovery_order(structures.last(), &descriptor);

        match first_seen.get(&descriptor.name) {
            Some(&first) => diagnostics.push(
                Diagnostic::with_detail(
                    DiagnosticKind::DuplicateStructure,
                    descriptor.name_span,
                    &descriptor.name,
                )
                .related_to("first annotated here", first),
            ),
            None => {
                first_seen.insert(descriptor.name.clone(), descriptor.name_span);
            }
        }

        structures.push(descriptor);
    }

    Ok((structures, diagnostics))
}

/// Runs the whole pipeline; the source is untouched on error.
pub fn generate(source: &str, config: &Config) -> PassResult<Generated> {
    let (structures, diagnostics) = scan(source)?;

    let rendered: Vec<String> = structures
        .iter()
        .map(|descriptor| codegen::render(descriptor, config))
        .collect();
    let patches: Vec<Patch<'_>> = structures
        .iter()
        .zip(&rendered)
        .map(|(descriptor, text)| Patch::new(descriptor, text))
        .collect();

    let mut buffer = source.as_bytes().to_vec();
    let insertions = splice(&mut buffer, &patches);

    Ok((
        Generated {
            buffer,
            structures,
            insertions,
        },
        diagnostics,
    ))
}
