//! Downstream C compiler invocation.

use std::path::{Path, PathBuf};
use std::process::Command;

pub const DEFAULT_CC: &str = "cc";
/// Binary name inside the output directory when `-o` is absent.
pub const DEFAULT_BINARY: &str = "out";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Compiler {
    program: String,
}

impl Compiler {
    /// `--cc`, then `$CC`, then [`DEFAULT_CC`].
    pub fn resolve(explicit: Option<String>) -> Self {
        Self::select(explicit, std::env::var("CC").ok())
    }

    pub fn select(explicit: Option<String>, from_env: Option<String>) -> Self {
        let program = explicit
            .or(from_env)
            .filter(|program| !program.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CC.to_string());
        Self { program }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// `<cc> <sources>... -o <binary> <extra>...`
    pub fn command(&self, sources: &[PathBuf], binary: &Path, extra: &[String]) -> Command {
        let mut command = Command::new(&self.program);
        command.args(sources).arg("-o").arg(binary).args(extra);
        command
    }

    /// Shell-like rendering of `command` for logs.
    pub fn describe(&self, command: &Command) -> String {
        let mut out = self.program.clone();
        for arg in command.get_args() {
            out.push(' ');
            out.push_str(&arg.to_string_lossy());
        }
        out
    }
}
