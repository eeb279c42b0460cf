//! File driver: runs the pipeline over files and persists the results.
//!
//! Each input is read, generated and written to `<out_dir>/<file name>`
//! independently. A failing file writes nothing and does not affect the
//! others.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

use crate::codegen::Config;
use crate::diagnostics::Diagnostics;
use crate::parser::StructureDescriptor;
use crate::{Error, pipeline};

pub const DEFAULT_OUT_DIR: &str = "build";

#[derive(Clone, Debug)]
pub struct DriverConfig {
    pub(crate) out_dir: PathBuf,
    pub(crate) codegen: Config,
    /// Warnings fail the file
    pub(crate) strict: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            codegen: Config::default(),
            strict: false,
        }
    }
}

impl DriverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn out_dir(mut self, value: impl Into<PathBuf>) -> Self {
        self.out_dir = value.into();
        self
    }

    pub fn codegen(mut self, value: Config) -> Self {
        self.codegen = value;
        self
    }

    pub fn strict(mut self, value: bool) -> Self {
        self.strict = value;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn codegen_config(&self) -> &Config {
        &self.codegen
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Where the generated version of `input` is written.
    pub fn output_path(&self, input: &Path) -> Result<PathBuf, DriverError> {
        let name = input.file_name().ok_or_else(|| DriverError::NoFileName {
            path: input.to_path_buf(),
        })?;
        Ok(self.out_dir.join(name))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("failed to read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("'{}' is not valid UTF-8", .path.display())]
    Utf8 {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },

    #[error("'{}' has no file name", .path.display())]
    NoFileName { path: PathBuf },

    #[error("output '{}' would overwrite its input", .path.display())]
    OverwritesInput { path: PathBuf },

    #[error(
        "'{}' and '{}' both generate '{}'",
        .first.display(),
        .second.display(),
        .output.display()
    )]
    OutputCollision {
        first: PathBuf,
        second: PathBuf,
        output: PathBuf,
    },

    #[error("failed to create output directory '{}': {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write '{}': {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("{}: {error}", .path.display())]
    Generate {
        path: PathBuf,
        text: String,
        error: Error,
    },

    #[error(
        "{}: {} warning(s) treated as errors",
        .path.display(),
        .diagnostics.warning_count()
    )]
    Strict {
        path: PathBuf,
        text: String,
        diagnostics: Diagnostics,
    },
}

impl DriverError {
    /// Source snippets for pipeline failures, a one-line message otherwise.
    pub fn render(&self, colored: bool) -> String {
        match self {
            DriverError::Generate { path, text, error } => {
                error.render(text, Some(&path.to_string_lossy()), colored)
            }
            DriverError::Strict {
                path,
                text,
                diagnostics,
            } => diagnostics
                .printer(text)
                .path(&path.to_string_lossy())
                .colored(colored)
                .render(),
            other => format!("error: {other}"),
        }
    }

    /// Whether the input itself was at fault, as opposed to the file system.
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            DriverError::Generate { .. } | DriverError::Strict { .. }
        )
    }
}

/// A successfully generated file.
#[derive(Debug, Clone)]
pub struct FileOutput {
    pub input: PathBuf,
    pub output: PathBuf,
    pub structures: Vec<StructureDescriptor>,
    /// Non-fatal diagnostics, against `text`.
    pub diagnostics: Diagnostics,
    /// Original input contents.
    pub text: String,
}

pub fn read_source(path: &Path) -> Result<String, DriverError> {
    let bytes = fs::read(path).map_err(|source| DriverError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|source| DriverError::Utf8 {
        path: path.to_path_buf(),
        source,
    })
}

/// Generates one file. Nothing is written unless generation succeeds.
pub fn process_file(input: &Path, config: &DriverConfig) -> Result<FileOutput, DriverError> {
    let output = config.output_path(input)?;
    let text = read_source(input)?;

    let (generated, diagnostics) = match pipeline::generate(&text, &config.codegen) {
        Ok(result) => result,
        Err(error) => {
            return Err(DriverError::Generate {
                path: input.to_path_buf(),
                text,
                error,
            });
        }
    };

    if config.strict && diagnostics.has_warnings() {
        return Err(DriverError::Strict {
            path: input.to_path_buf(),
            text,
            diagnostics,
        });
    }

    fs::create_dir_all(&config.out_dir).map_err(|source| DriverError::CreateDir {
        path: config.out_dir.clone(),
        source,
    })?;

    if is_same_file(input, &output) {
        return Err(DriverError::OverwritesInput { path: output });
    }

    fs::write(&output, &generated.buffer).map_err(|source| DriverError::Write {
        path: output.clone(),
        source,
    })?;
    info!(
        "{} -> {} ({} structure(s))",
        input.display(),
        output.display(),
        generated.structures.len()
    );

    Ok(FileOutput {
        input: input.to_path_buf(),
        output,
        structures: generated.structures,
        diagnostics,
        text,
    })
}

/// Generates every input in order; results line up with `inputs`.
///
/// An input whose output path was already claimed by an earlier input fails
/// without being read.
pub fn process_files(
    inputs: &[PathBuf],
    config: &DriverConfig,
) -> Vec<Result<FileOutput, DriverError>> {
    let mut claimed: HashMap<OsString, &Path> = HashMap::new();

    inputs
        .iter()
        .map(|input| {
            if let Some(name) = input.file_name() {
                if let Some(first) = claimed.get(name) {
                    return Err(DriverError::OutputCollision {
                        first: first.to_path_buf(),
                        second: input.clone(),
                        output: config.out_dir.join(name),
                    });
                }
                claimed.insert(name.to_os_string(), input);
            }
            process_file(input, config)
        })
        .collect()
}

fn is_same_file(input: &Path, output: &Path) -> bool {
    match (fs::canonicalize(input), fs::canonicalize(output)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
