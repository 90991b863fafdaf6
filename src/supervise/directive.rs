// src/supervise/directive.rs

use std::path::PathBuf;

/// Debug directive for the verification process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugSpec {
    /// `--inspect` with the runner's default port.
    Inspect,
    /// `--inspect=<port>`.
    InspectPort(u16),
}

impl DebugSpec {
    /// Translate the CLI's `--debug[=port]` flag.
    pub fn from_cli(flag: Option<Option<u16>>) -> Option<Self> {
        match flag {
            None => None,
            Some(None) => Some(DebugSpec::Inspect),
            Some(Some(port)) => Some(DebugSpec::InspectPort(port)),
        }
    }

    pub fn inspect_flag(&self) -> String {
        match self {
            DebugSpec::Inspect => "--inspect".to_string(),
            DebugSpec::InspectPort(port) => format!("--inspect={port}"),
        }
    }
}

/// Immutable description of how to start the verification process.
///
/// Constructed once at startup and reused unchanged across every restart
/// within one supervisor lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchDirective {
    /// Resolved path the runner is pointed at (output dir + test root).
    pub target_path: PathBuf,

    /// Optional inspector directive.
    pub debug: Option<DebugSpec>,

    /// Arguments captured after a literal `--` on the host command line,
    /// forwarded verbatim to the runner.
    pub pass_through: Vec<String>,
}
