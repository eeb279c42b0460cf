//! Shared logic for commands that process many files.

use std::path::PathBuf;

use log::info;

use cerdeb_lib::driver::{self, DriverConfig, DriverError, FileOutput};
use cerdeb_lib::{Diagnostics, Error};

/// Usage or file system failure.
pub const EXIT_IO: i32 = 1;
/// An input could not be scanned, parsed or generated.
pub const EXIT_GENERATE: i32 = 2;
/// The downstream compiler failed or could not be started.
pub const EXIT_COMPILE: i32 = 3;

/// Outcome of a batch: generation failures outrank I/O failures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Failures {
    pub generation: usize,
    pub io: usize,
}

impl Failures {
    pub fn record(&mut self, error: &DriverError) {
        if error.is_generation_failure() {
            self.generation += 1;
        } else {
            self.io += 1;
        }
    }

    pub fn exit_code(&self) -> Option<i32> {
        if self.generation > 0 {
            Some(EXIT_GENERATE)
        } else if self.io > 0 {
            Some(EXIT_IO)
        } else {
            None
        }
    }

    /// Exits when anything failed.
    pub fn exit_on_failure(&self) {
        if let Some(code) = self.exit_code() {
            std::process::exit(code);
        }
    }
}

/// Generates every file, reporting each failure as it happens.
///
/// Exits with the batch's code after the last file if any of them failed.
pub fn generate_all(files: &[PathBuf], config: &DriverConfig, color: bool) -> Vec<FileOutput> {
    let mut failures = Failures::default();
    let mut outputs = Vec::with_capacity(files.len());

    for result in driver::process_files(files, config) {
        match result {
            Ok(output) => {
                print_warnings(&output.diagnostics, &output.text, &output.input, color);
                outputs.push(output);
            }
            Err(error) => {
                eprintln!("{}", error.render(color));
                failures.record(&error);
            }
        }
    }

    failures.exit_on_failure();
    info!(
        "generated {} file(s) into {}",
        outputs.len(),
        config.output_dir().display()
    );
    outputs
}

pub fn print_warnings(diagnostics: &Diagnostics, text: &str, path: &std::path::Path, color: bool) {
    if diagnostics.is_empty() {
        return;
    }
    let rendered = diagnostics
        .printer(text)
        .path(&path.to_string_lossy())
        .colored(color)
        .render();
    eprintln!("{rendered}");
}

pub fn print_error(error: &Error, text: &str, path: &std::path::Path, color: bool) {
    eprintln!("{}", error.render(text, Some(&path.to_string_lossy()), color));
}
