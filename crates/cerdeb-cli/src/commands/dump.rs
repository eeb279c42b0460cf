use std::io::IsTerminal;
use std::path::PathBuf;

use cerdeb_lib::driver::read_source;
use cerdeb_lib::scan;

use super::run_common::{EXIT_GENERATE, EXIT_IO, print_error, print_warnings};

pub struct DumpArgs {
    pub file: PathBuf,
    pub compact: bool,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let text = match read_source(&args.file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("{}", e.render(args.color));
            std::process::exit(EXIT_IO);
        }
    };

    let (structures, diagnostics) = match scan(&text) {
        Ok(result) => result,
        Err(e) => {
            print_error(&e, &text, &args.file, args.color);
            std::process::exit(EXIT_GENERATE);
        }
    };
    print_warnings(&diagnostics, &text, &args.file, args.color);

    let pretty = !args.compact && std::io::stdout().is_terminal();
    let json = if pretty {
        serde_json::to_string_pretty(&structures)
    } else {
        serde_json::to_string(&structures)
    };

    match json {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("error: failed to serialize structures: {}", e);
            std::process::exit(EXIT_IO);
        }
    }
}
