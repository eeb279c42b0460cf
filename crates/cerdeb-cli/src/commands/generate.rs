use std::path::PathBuf;

use cerdeb_lib::DriverConfig;

use super::run_common::generate_all;

pub struct GenArgs {
    pub files: Vec<PathBuf>,
    pub config: DriverConfig,
    pub color: bool,
}

pub fn run(args: GenArgs) {
    generate_all(&args.files, &args.config, args.color);
    // Silent on success
}
