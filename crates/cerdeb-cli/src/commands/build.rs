use std::path::PathBuf;

use log::info;

use cerdeb_lib::DriverConfig;

use super::compiler::{Compiler, DEFAULT_BINARY};
use super::run_common::{EXIT_COMPILE, generate_all};

pub struct BuildArgs {
    pub files: Vec<PathBuf>,
    pub config: DriverConfig,
    pub output: Option<PathBuf>,
    pub cc: Option<String>,
    pub cc_args: Vec<String>,
    pub color: bool,
}

pub fn run(args: BuildArgs) {
    // Exits before compiling if any file failed.
    let outputs = generate_all(&args.files, &args.config, args.color);

    let binary = args
        .output
        .unwrap_or_else(|| args.config.output_dir().join(DEFAULT_BINARY));
    let sources: Vec<PathBuf> = outputs.into_iter().map(|o| o.output).collect();

    let compiler = Compiler::resolve(args.cc);
    let mut command = compiler.command(&sources, &binary, &args.cc_args);
    info!("running {}", compiler.describe(&command));

    match command.status() {
        Ok(status) if status.success() => {
            info!("built {}", binary.display());
        }
        Ok(status) => {
            eprintln!("error: `{}` failed: {}", compiler.program(), status);
            std::process::exit(EXIT_COMPILE);
        }
        Err(e) => {
            eprintln!("error: failed to run `{}`: {}", compiler.program(), e);
            std::process::exit(EXIT_COMPILE);
        }
    }
}
