use indoc::indoc;

use crate::codegen::{BufferStrategy, Config};
use crate::diagnostics::DiagnosticKind;
use crate::test_utils::{expect_generate_error, expect_generated, generate_with, strip_insertions};
use crate::{Error, generate, scan};

#[test]
fn point_end_to_end() {
    let source = indoc! {r#"
        #include <stdio.h>

        !debug
        typedef struct { int x; char* name; } Point;

        int main(void) {
            Point p = { 3, "hello" };
            printf("%s\n", debug_print_Point(&p));
            return 0;
        }
    "#};

    insta::assert_snapshot!(expect_generated(source), @r#"
    #include <stdio.h>

    // !debug
    typedef struct { int x; char* name; } Point;

    #include <stdio.h>

    char *debug_print_Point(const Point *value) {
        static char buf[1024];
        snprintf(buf, sizeof buf, "Point { .x = %d, .name = %s }", value->x, value->name);
        return buf;
    }

    int main(void) {
        Point p = { 3, "hello" };
        printf("%s\n", debug_print_Point(&p));
        return 0;
    }
    "#);
}

#[test]
fn several_structures() {
    let source = indoc! {r#"
        !debug
        typedef struct { long id; } A;
        int between;
        !debug
        typedef struct { } B;
    "#};
    let config = Config::new().emit_includes(false);

    insta::assert_snapshot!(generate_with(source, &config), @r#"
    // !debug
    typedef struct { long id; } A;

    char *debug_print_A(const A *value) {
        static char buf[1024];
        snprintf(buf, sizeof buf, "A { .id = %ld }", value->id);
        return buf;
    }
    int between;
    // !debug
    typedef struct { } B;

    char *debug_print_B(const B *value) {
        static char buf[1024];
        snprintf(buf, sizeof buf, "B { }");
        return buf;
    }
    "#);
}

#[test]
fn discovery_order_and_offsets() {
    let source = "!debug\ntypedef struct { int a; } A;\n!debug\ntypedef struct { int b; } B;\n";
    let (structures, diagnostics) = scan(source).unwrap();

    assert!(diagnostics.is_empty());
    let names: Vec<_> = structures.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["A", "B"]);
    assert!(structures[0].insertion_offset <= structures[1].marker_offset);
    assert_eq!(&source[structures[1].marker_offset..][..6], "!debug");
}

#[test]
fn back_to_back_structures() {
    let source = "!debug\ntypedef struct { int a; } A;!debug\ntypedef struct { int b; } B;\n";
    let (structures, _) = scan(source).unwrap();

    assert_eq!(structures[0].insertion_offset, 35);
    assert_eq!(structures[1].marker_offset, 35);

    let config = Config::new().emit_includes(false);
    insta::assert_snapshot!(generate_with(source, &config), @r#"
    // !debug
    typedef struct { int a; } A;

    char *debug_print_A(const A *value) {
        static char buf[1024];
        snprintf(buf, sizeof buf, "A { .a = %d }", value->a);
        return buf;
    }// !debug
    typedef struct { int b; } B;

    char *debug_print_B(const B *value) {
        static char buf[1024];
        snprintf(buf, sizeof buf, "B { .b = %d }", value->b);
        return buf;
    }
    "#);
}

#[test]
fn declaration_on_marker_line_aborts() {
    let error = expect_generate_error("int y; !debug typedef struct { int a; } A;\n");

    let Error::StructureShape(diag) = &error else {
        panic!("expected a shape error, got {error:?}");
    };
    assert_eq!(diag.kind(), DiagnosticKind::DeclarationOnMarkerLine);
    assert_eq!(
        error.to_string(),
        "malformed annotated structure: `!debug` must be the last thing on its line"
    );
}

#[test]
fn code_before_marker_survives() {
    let source = "int y; !debug\ntypedef struct { int a; } A;\n";
    let out = generate_with(source, &Config::new().emit_includes(false));
    assert!(out.starts_with("int y; // !debug\ntypedef struct { int a; } A;\n"));
}

#[test]
fn source_without_annotations_is_unchanged() {
    let source = "int main(void) { return 0; }\n";
    let (generated, diagnostics) = generate(source, &Config::default()).unwrap();
    assert!(generated.is_unchanged());
    assert!(diagnostics.is_empty());
    assert_eq!(generated.buffer, source.as_bytes());
}

#[test]
fn nested_marker_is_left_alone() {
    let source = "void f(void) {\n!debug\n}\n";
    assert_eq!(expect_generated(source), source);
}

#[test]
fn output_is_a_fixed_point() {
    let source = indoc! {r#"
        !debug
        typedef struct { double ratio; int *slot; } R;
    "#};
    let once = expect_generated(source);
    let (again, _) = generate(&once, &Config::default()).unwrap();

    assert!(again.is_unchanged());
    assert!(again.structures.is_empty());
    assert_eq!(again.text(), once);
}

#[test]
fn insertions_strip_back_to_source() {
    let source = "!debug\ntypedef struct { char c; } C;\n!debug\ntypedef struct { short s; } S;";
    let config = Config::new().buffer(BufferStrategy::Heap);
    let (generated, _) = generate(source, &config).unwrap();

    assert_eq!(generated.insertions.len(), 4);
    assert_eq!(strip_insertions(&generated.buffer, &generated.insertions), source.as_bytes());
}

#[test]
fn duplicate_names_warn() {
    let source = indoc! {r#"
        !debug
        typedef struct { int a; } Twice;
        !debug
        typedef struct { int b; } Twice;
    "#};
    let (generated, diagnostics) = generate(source, &Config::default()).unwrap();

    assert_eq!(generated.structures.len(), 2);
    assert_eq!(diagnostics.iter().count(), 1);
    assert_eq!(diagnostics.warning_count(), 1);

    let warning = diagnostics.iter().next().unwrap();
    assert_eq!(warning.kind(), DiagnosticKind::DuplicateStructure);
    assert_eq!(warning.message(), "`Twice` is already annotated in this file");
    assert_eq!(warning.related[0].message, "first annotated here");
}

#[test]
fn malformed_structure_aborts_whole_source() {
    let source = indoc! {r#"
        !debug
        typedef struct { int ok; } Good;
        !debug
        typedef struct { unsigned bad; } Bad;
    "#};
    let error = expect_generate_error(source);

    let Error::StructureShape(diag) = &error else {
        panic!("expected a shape error, got {error:?}");
    };
    assert_eq!(diag.kind(), DiagnosticKind::UnsupportedFieldType);
    assert_eq!(
        error.to_string(),
        "malformed annotated structure: unsupported field type `unsigned`"
    );
}

#[test]
fn lexical_error_aborts_whole_source() {
    let error = expect_generate_error("!debug\ntypedef struct { int x; } P;\n/* open");
    assert!(matches!(error, Error::Lex(_)));
    assert_eq!(error.diagnostic().kind(), DiagnosticKind::UnterminatedComment);
    assert_eq!(error.to_string(), "lexical error: unterminated block comment");
}

#[test]
fn rendered_error_names_path() {
    let source = "!debug\ntypedef struct { int x } P;";
    let error = expect_generate_error(source);
    let rendered = error.render(source, Some("point.c"), false);

    assert!(rendered.contains("point.c"));
    assert!(rendered.contains("expected `;`"));
    assert!(rendered.contains("annotation here"));
}

#[test]
fn descriptors_serialize_without_spans() {
    let (structures, _) = scan("!debug\ntypedef struct { int *p; } P;").unwrap();
    let json = serde_json::to_value(&structures).unwrap();

    assert_eq!(
        json,
        serde_json::json!([{
            "name": "P",
            "fields": [{ "name": "p", "family": "Pointer" }],
            "marker_offset": 0,
            "insertion_offset": 36,
        }])
    );
}

#[test]
fn end_of_input_after_multibyte_comment_renders() {
    let source = "!debug\ntypedef struct { int x; } P // é";
    let error = expect_generate_error(source);
    assert_eq!(error.diagnostic().kind(), DiagnosticKind::UnexpectedEof);

    let rendered = error.render(source, Some("p.c"), false);
    assert!(rendered.contains("unexpected end of input"));
    assert!(rendered.contains("annotation here"));
}
