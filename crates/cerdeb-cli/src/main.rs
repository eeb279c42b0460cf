mod cli;
mod commands;

use cli::{BuildParams, CheckParams, DumpParams, GenParams, build_cli};
use log::LevelFilter;

fn main() {
    let matches = build_cli().get_matches();

    let Some((name, m)) = matches.subcommand() else {
        unreachable!("clap should have caught this");
    };
    init_logging(m.get_count("verbose"));

    match name {
        "build" => {
            let params = BuildParams::from_matches(m);
            commands::build::run(params.into());
        }
        "gen" => {
            let params = GenParams::from_matches(m);
            commands::generate::run(params.into());
        }
        "check" => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        "dump" => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// `-v` steps from warnings up to trace; `RUST_LOG` wins when set.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
