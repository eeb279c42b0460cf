use indoc::indoc;

use crate::diagnostics::DiagnosticKind;
use crate::scanner::Scanner;

fn offsets(source: &str) -> Vec<usize> {
    let mut scanner = Scanner::new(source);
    let mut out = Vec::new();
    while let Some(annotation) = scanner.next_annotation().unwrap() {
        out.push(annotation.offset());
    }
    out
}

#[test]
fn marker_at_top_level() {
    let source = "int a;\n!debug\n";
    assert_eq!(offsets(source), [7]);
}

#[test]
fn annotation_span_covers_both_tokens() {
    let mut scanner = Scanner::new("  ! debug");
    let annotation = scanner.next_annotation().unwrap().unwrap();
    assert_eq!(annotation.span.start, 2);
    assert_eq!(annotation.span.end, 9);
}

#[test]
fn stream_resumes_after_marker() {
    let mut scanner = Scanner::new("!debug typedef");
    scanner.next_annotation().unwrap().unwrap();
    let tokens = scanner.tokens();
    let next = tokens.next_token().unwrap().unwrap();
    assert_eq!(tokens.text(&next), "typedef");
}

#[test]
fn nested_markers_are_ignored() {
    let source = indoc! {r#"
        void f(void) {
            !debug
            if (x) { !debug }
        }
    "#};
    assert!(offsets(source).is_empty());
}

#[test]
fn near_miss_leaves_next_token_for_depth_tracking() {
    // `{` after the lone `!` still opens a block.
    let source = "! {\n!debug\n}\n!debug";
    assert_eq!(offsets(source), [13]);
}

#[test]
fn lookalikes_are_not_markers() {
    let source = indoc! {r#"
        int ok = a != debug;
        !debugger
        !Debug
        // !debug
        /* !debug */
        char *s = "!debug";
    "#};
    assert!(offsets(source).is_empty());
}

#[test]
fn stray_closing_brace_does_not_underflow() {
    let mut scanner = Scanner::new("}}\n!debug");
    assert_eq!(scanner.next_annotation().unwrap().unwrap().offset(), 3);
    assert_eq!(scanner.depth(), 0);
}

#[test]
fn multiple_markers_in_order() {
    let source = "!debug a; !debug b; { !debug } !debug";
    assert_eq!(offsets(source), [0, 10, 31]);
}

#[test]
fn lexical_error_surfaces() {
    let mut scanner = Scanner::new("\"oops\n!debug");
    let diag = scanner.next_annotation().unwrap_err();
    assert_eq!(diag.kind(), DiagnosticKind::UnterminatedLiteral);
}
