use std::path::PathBuf;

use log::info;

use cerdeb_lib::driver::read_source;
use cerdeb_lib::scan;

use super::run_common::{Failures, print_error, print_warnings};

pub struct CheckArgs {
    pub files: Vec<PathBuf>,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let mut failures = Failures::default();

    for path in &args.files {
        let text = match read_source(path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("{}", e.render(args.color));
                failures.record(&e);
                continue;
            }
        };

        match scan(&text) {
            Ok((structures, diagnostics)) => {
                print_warnings(&diagnostics, &text, path, args.color);
                if args.strict && diagnostics.has_warnings() {
                    eprintln!("error: {}: warnings treated as errors", path.display());
                    failures.generation += 1;
                    continue;
                }
                info!("{}: {} structure(s)", path.display(), structures.len());
            }
            Err(e) => {
                print_error(&e, &text, path, args.color);
                failures.generation += 1;
            }
        }
    }

    failures.exit_on_failure();
    // Silent on success (like cargo check)
}
