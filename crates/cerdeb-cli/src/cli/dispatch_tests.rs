//! Tests for CLI parsing and dispatch.

use std::path::PathBuf;

use cerdeb_lib::codegen::render;
use cerdeb_lib::scan;

use super::*;
use crate::cli::commands::{build_command, check_command, dump_command, gen_command};

/// Generated text for a one-field structure under `config`.
fn rendered(config: &cerdeb_lib::DriverConfig) -> String {
    let (structures, _) = scan("!debug\ntypedef struct { int n; } N;").unwrap();
    render(&structures[0], config.codegen_config())
}

#[test]
fn gen_defaults() {
    let m = gen_command()
        .try_get_matches_from(["gen", "main.c"])
        .unwrap();
    let params = GenParams::from_matches(&m);

    assert_eq!(params.files, [PathBuf::from("main.c")]);
    assert_eq!(params.codegen.out_dir, PathBuf::from("build"));
    assert_eq!(params.color, ColorChoice::Auto);

    let config = params.codegen.driver_config();
    assert!(!config.is_strict());
    let text = rendered(&config);
    assert!(text.contains("char *debug_print_N(const N *value)"));
    assert!(text.contains("static char buf[1024];"));
    assert!(text.contains("#include <stdio.h>"));
}

#[test]
fn gen_codegen_flags() {
    let m = gen_command()
        .try_get_matches_from([
            "gen",
            "a.c",
            "b.c",
            "--out-dir",
            "gen",
            "--prefix",
            "show_",
            "--static-buffer",
            "256",
            "--no-includes",
            "--strict",
        ])
        .unwrap();
    let params = GenParams::from_matches(&m);

    assert_eq!(params.files.len(), 2);
    let config = params.codegen.driver_config();
    assert_eq!(config.output_dir(), PathBuf::from("gen"));
    assert!(config.is_strict());

    let text = rendered(&config);
    assert!(text.contains("char *show_N(const N *value)"));
    assert!(text.contains("static char buf[256];"));
    assert!(!text.contains("#include"));
}

#[test]
fn heap_flag_selects_malloc() {
    let m = gen_command()
        .try_get_matches_from(["gen", "main.c", "--heap"])
        .unwrap();
    let text = rendered(&GenParams::from_matches(&m).codegen.driver_config());

    assert!(text.contains("#include <stdlib.h>"));
    assert!(text.contains("malloc((size_t)len + 1)"));
}

#[test]
fn heap_conflicts_with_static_buffer() {
    let result =
        gen_command().try_get_matches_from(["gen", "main.c", "--heap", "--static-buffer", "8"]);
    assert!(result.is_err());
}

#[test]
fn static_buffer_must_hold_something() {
    let result = gen_command().try_get_matches_from(["gen", "main.c", "--static-buffer", "0"]);
    assert!(result.is_err());

    let m = gen_command()
        .try_get_matches_from(["gen", "main.c", "--static-buffer", "1"])
        .unwrap();
    let config = GenParams::from_matches(&m).codegen.driver_config();
    assert!(rendered(&config).contains("static char buf[1];"));
}

#[test]
fn gen_requires_files() {
    assert!(gen_command().try_get_matches_from(["gen"]).is_err());
}

#[test]
fn build_passes_compiler_args_through() {
    let m = build_command()
        .try_get_matches_from([
            "build", "main.c", "util.c", "-o", "app", "--cc", "clang", "--", "-g", "-O2",
        ])
        .unwrap();
    let params = BuildParams::from_matches(&m);

    assert_eq!(
        params.files,
        [PathBuf::from("main.c"), PathBuf::from("util.c")]
    );
    assert_eq!(params.output, Some(PathBuf::from("app")));
    assert_eq!(params.cc.as_deref(), Some("clang"));
    assert_eq!(params.cc_args, ["-g", "-O2"]);
}

#[test]
fn build_without_extras() {
    let m = build_command()
        .try_get_matches_from(["build", "main.c"])
        .unwrap();
    let params = BuildParams::from_matches(&m);

    assert_eq!(params.output, None);
    assert_eq!(params.cc, None);
    assert!(params.cc_args.is_empty());
}

#[test]
fn check_flags() {
    let m = check_command()
        .try_get_matches_from(["check", "main.c", "--strict", "--color", "never"])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert!(params.strict);
    assert_eq!(params.color, ColorChoice::Never);
    assert!(!params.color.should_colorize());
}

#[test]
fn check_rejects_codegen_flags() {
    let result = check_command().try_get_matches_from(["check", "main.c", "--heap"]);
    assert!(result.is_err());
}

#[test]
fn dump_single_file() {
    let m = dump_command()
        .try_get_matches_from(["dump", "main.c", "--compact"])
        .unwrap();
    let params = DumpParams::from_matches(&m);

    assert_eq!(params.file, PathBuf::from("main.c"));
    assert!(params.compact);
    assert!(dump_command()
        .try_get_matches_from(["dump", "a.c", "b.c"])
        .is_err());
}

#[test]
fn verbosity_counts() {
    let m = gen_command()
        .try_get_matches_from(["gen", "main.c", "-vvv"])
        .unwrap();
    assert_eq!(m.get_count("verbose"), 3);
}

#[test]
fn color_always() {
    assert!(ColorChoice::Always.should_colorize());
}

#[test]
fn cli_is_consistent() {
    build_cli().debug_assert();
}
