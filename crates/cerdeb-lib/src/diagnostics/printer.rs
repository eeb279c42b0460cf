//! Snippet rendering of diagnostics against the C source they refer to.

use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use super::{Diagnostic, Diagnostics, Severity, Span};

pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: &'s str,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics, source: &'s str) -> Self {
        Self {
            diagnostics,
            source,
            path: None,
            colored: false,
        }
    }

    /// File name shown in the `-->` line.
    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    /// One report per diagnostic, separated by blank lines.
    pub fn render(&self) -> String {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let reports: Vec<String> = self
            .diagnostics
            .iter()
            .map(|diag| {
                let report = [self.report(diag)];
                renderer.render(&report).to_string()
            })
            .collect();
        reports.join("\n")
    }

    fn report<'a>(&'a self, diag: &'a Diagnostic) -> Group<'a> {
        let mut snippet = Snippet::source(self.source).line_start(1).annotation(
            AnnotationKind::Primary
                .span(caret_range(diag.span, self.source))
                .label(&diag.message),
        );
        if let Some(path) = self.path {
            snippet = snippet.path(path);
        }
        for related in &diag.related {
            snippet = snippet.annotation(
                AnnotationKind::Context
                    .span(caret_range(related.span, self.source))
                    .label(&related.message),
            );
        }

        let level = match diag.severity() {
            Severity::Error => Level::ERROR,
            Severity::Warning => Level::WARNING,
        };
        let mut group = level.primary_title(&diag.message).element(snippet);
        for hint in &diag.hints {
            group = group.element(Level::HELP.message(hint));
        }
        group
    }
}

/// Byte range to underline. An empty span (end of input) becomes the
/// character at or before it, never splitting a multi-byte character.
fn caret_range(span: Span, source: &str) -> Range<usize> {
    if !span.is_empty() {
        return span.range();
    }

    let mut start = span.start.min(source.len());
    if start == source.len() {
        start = start.saturating_sub(1);
    }
    while !source.is_char_boundary(start) {
        start -= 1;
    }
    let end = source[start..]
        .chars()
        .next()
        .map_or(start, |c| start + c.len_utf8());
    start..end
}

impl Diagnostics {
    pub fn printer<'d, 's>(&'d self, source: &'s str) -> DiagnosticsPrinter<'d, 's> {
        DiagnosticsPrinter::new(self, source)
    }
}
