pub mod build;
pub mod check;
pub mod compiler;
pub mod dump;
pub mod generate;
pub mod run_common;
