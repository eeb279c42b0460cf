//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.

use clap::Command;

use super::args::*;

/// Generation flags shared by `build` and `gen`.
fn with_codegen_args(cmd: Command) -> Command {
    cmd.arg(out_dir_arg())
        .arg(prefix_arg())
        .arg(static_buffer_arg())
        .arg(heap_arg())
        .arg(no_includes_arg())
        .arg(strict_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("cerdeb")
        .about("Generate debug-print functions for annotated C structures")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(build_command())
        .subcommand(gen_command())
        .subcommand(check_command())
        .subcommand(dump_command())
}

/// Generate, then compile the generated sources.
pub fn build_command() -> Command {
    let cmd = Command::new("build")
        .about("Generate debug printers and compile the result")
        .override_usage("  cerdeb build <FILES>... [-o <FILE>] [--cc <CC>] [-- <CC_ARGS>...]")
        .after_help(
            r#"EXAMPLES:
  cerdeb build main.c                    # build/main.c, then cc -> build/out
  cerdeb build main.c util.c -o app      # several files, custom binary
  cerdeb build main.c --cc clang -- -g   # compiler and its flags
  cerdeb build main.c --heap             # malloc'd strings instead of a static buffer"#,
        )
        .arg(files_arg())
        .arg(output_arg())
        .arg(cc_arg())
        .arg(cc_args_arg());

    with_codegen_args(cmd)
        .arg(color_arg())
        .arg(verbose_arg())
}

/// Generate only.
pub fn gen_command() -> Command {
    let cmd = Command::new("gen")
        .about("Generate debug printers without compiling")
        .after_help(
            r#"EXAMPLES:
  cerdeb gen main.c                      # writes build/main.c
  cerdeb gen src/*.c --out-dir gen       # custom output directory
  cerdeb gen main.c --prefix show_       # show_Point instead of debug_print_Point"#,
        )
        .arg(files_arg());

    with_codegen_args(cmd)
        .arg(color_arg())
        .arg(verbose_arg())
}

/// Scan and parse only.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate annotated structures without writing anything")
        .after_help(
            r#"EXAMPLES:
  cerdeb check main.c                    # silent on success
  cerdeb check src/*.c --strict          # warnings fail too"#,
        )
        .arg(files_arg())
        .arg(strict_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// Print discovered structures as JSON.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Print annotated structures as JSON")
        .after_help(
            r#"EXAMPLES:
  cerdeb dump main.c                     # pretty on a terminal
  cerdeb dump main.c --compact | jq .    # one line"#,
        )
        .arg(file_arg())
        .arg(compact_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}
