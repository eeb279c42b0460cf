//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Arg, ArgAction, value_parser};

use cerdeb_lib::driver::DEFAULT_OUT_DIR;

/// C sources to process (positional, one or more).
pub fn files_arg() -> Arg {
    Arg::new("files")
        .value_name("FILES")
        .value_parser(value_parser!(PathBuf))
        .num_args(1..)
        .required(true)
        .help("C source files")
}

/// Single C source (positional).
pub fn file_arg() -> Arg {
    Arg::new("file")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("C source file")
}

/// Directory receiving generated sources (--out-dir).
pub fn out_dir_arg() -> Arg {
    Arg::new("out_dir")
        .long("out-dir")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .default_value(DEFAULT_OUT_DIR)
        .help("Directory for generated sources")
}

/// Compiled binary path (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Path of the compiled binary (default: <DIR>/out)")
}

/// C compiler program (--cc).
pub fn cc_arg() -> Arg {
    Arg::new("cc")
        .long("cc")
        .value_name("CC")
        .help("C compiler (default: $CC, then cc)")
}

/// Extra compiler arguments after `--`.
pub fn cc_args_arg() -> Arg {
    Arg::new("cc_args")
        .value_name("CC_ARGS")
        .num_args(1..)
        .last(true)
        .allow_hyphen_values(true)
        .help("Arguments passed to the compiler verbatim")
}

/// Generated function name prefix (--prefix).
pub fn prefix_arg() -> Arg {
    Arg::new("prefix")
        .long("prefix")
        .value_name("PREFIX")
        .help("Prefix of generated function names (default: debug_print_)")
}

/// Static buffer capacity (--static-buffer).
pub fn static_buffer_arg() -> Arg {
    Arg::new("static_buffer")
        .long("static-buffer")
        .value_name("BYTES")
        .value_parser(RangedU64ValueParser::<usize>::new().range(1..))
        .conflicts_with("heap")
        .help("Format into a static buffer of this size (default: 1024)")
}

/// Heap-allocated output (--heap).
pub fn heap_arg() -> Arg {
    Arg::new("heap")
        .long("heap")
        .action(ArgAction::SetTrue)
        .help("Return exactly-sized malloc'd strings the caller must free")
}

/// Skip `#include`s before generated functions (--no-includes).
pub fn no_includes_arg() -> Arg {
    Arg::new("no_includes")
        .long("no-includes")
        .action(ArgAction::SetTrue)
        .help("Don't emit #include lines before generated functions")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON (default: pretty when stdout is a TTY)")
}

/// Log verbosity (-v, repeatable).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v info, -vv debug, -vvv trace)")
}
