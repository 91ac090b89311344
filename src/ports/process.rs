//! Process runner port for launching the pipeline.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use super::PortError;

/// A fully described subprocess invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Executable path.
    pub program: String,
    /// Arguments after the program.
    pub args: Vec<String>,
    /// Working directory.
    pub cwd: PathBuf,
    /// Variables layered over the inherited environment.
    pub env: BTreeMap<String, String>,
}

impl Invocation {
    /// Program followed by its arguments.
    #[must_use]
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str)).collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv().join(" "))
    }
}

/// Runs a subprocess to completion.
pub trait ProcessRunner: Send + Sync {
    /// Runs the invocation, blocking until it exits, and returns its exit
    /// code. Processes killed by a signal report `128 + signal`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the process could not be started or waited on.
    fn run(&self, invocation: &Invocation) -> Result<i32, PortError>;
}
