//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors pull the fields each command uses
//! - `Into<*Args>` impls bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;

use cerdeb_lib::{BufferStrategy, Config, DriverConfig};

use super::ColorChoice;
use crate::commands::build::BuildArgs;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::generate::GenArgs;

/// Generation flags shared by `build` and `gen`.
#[derive(Debug, Default)]
pub struct CodegenParams {
    pub out_dir: PathBuf,
    pub prefix: Option<String>,
    pub static_buffer: Option<usize>,
    pub heap: bool,
    pub no_includes: bool,
    pub strict: bool,
}

impl CodegenParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            out_dir: m
                .get_one::<PathBuf>("out_dir")
                .cloned()
                .unwrap_or_default(),
            prefix: m.get_one::<String>("prefix").cloned(),
            static_buffer: m.get_one::<usize>("static_buffer").copied(),
            heap: m.get_flag("heap"),
            no_includes: m.get_flag("no_includes"),
            strict: m.get_flag("strict"),
        }
    }

    pub fn driver_config(&self) -> DriverConfig {
        let buffer = match (self.heap, self.static_buffer) {
            (true, _) => BufferStrategy::Heap,
            (false, Some(capacity)) => BufferStrategy::Static(capacity),
            (false, None) => BufferStrategy::default(),
        };

        let mut codegen = Config::new()
            .buffer(buffer)
            .emit_includes(!self.no_includes);
        if let Some(prefix) = &self.prefix {
            codegen = codegen.fn_prefix(prefix.as_str());
        }

        DriverConfig::new()
            .out_dir(self.out_dir.clone())
            .codegen(codegen)
            .strict(self.strict)
    }
}

pub struct GenParams {
    pub files: Vec<PathBuf>,
    pub codegen: CodegenParams,
    pub color: ColorChoice,
}

impl GenParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            files: parse_files(m),
            codegen: CodegenParams::from_matches(m),
            color: parse_color(m),
        }
    }
}

impl From<GenParams> for GenArgs {
    fn from(p: GenParams) -> Self {
        Self {
            files: p.files,
            config: p.codegen.driver_config(),
            color: p.color.should_colorize(),
        }
    }
}

pub struct BuildParams {
    pub files: Vec<PathBuf>,
    pub codegen: CodegenParams,
    pub output: Option<PathBuf>,
    pub cc: Option<String>,
    pub cc_args: Vec<String>,
    pub color: ColorChoice,
}

impl BuildParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            files: parse_files(m),
            codegen: CodegenParams::from_matches(m),
            output: m.get_one::<PathBuf>("output").cloned(),
            cc: m.get_one::<String>("cc").cloned(),
            cc_args: m
                .get_many::<String>("cc_args")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            color: parse_color(m),
        }
    }
}

impl From<BuildParams> for BuildArgs {
    fn from(p: BuildParams) -> Self {
        Self {
            files: p.files,
            config: p.codegen.driver_config(),
            output: p.output,
            cc: p.cc,
            cc_args: p.cc_args,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub files: Vec<PathBuf>,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            files: parse_files(m),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            files: p.files,
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub file: PathBuf,
    pub compact: bool,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            file: m.get_one::<PathBuf>("file").cloned().unwrap_or_default(),
            compact: m.get_flag("compact"),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            file: p.file,
            compact: p.compact,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_files(m: &ArgMatches) -> Vec<PathBuf> {
    m.get_many::<PathBuf>("files")
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
