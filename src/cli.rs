// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `watchtest`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "watchtest",
    version,
    about = "Keep a test runner in sync with a watch-mode build.",
    long_about = None
)]
pub struct CliArgs {
    /// Application name selecting an `[app.<name>]` section in the config.
    ///
    /// If omitted, only the `[default]` section and built-in defaults apply.
    #[arg(value_name = "APP")]
    pub app: Option<String>,

    /// Path to the project config file (TOML).
    ///
    /// Default: `Watchtest.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Watchtest.toml")]
    pub config: String,

    /// Override the compiler configuration file path.
    #[arg(long, value_name = "PATH")]
    pub path: Option<String>,

    /// Launch the test runner with the inspector enabled.
    ///
    /// `--debug` uses the runner's default inspector port; `--debug=9229`
    /// pins the port.
    #[arg(long, value_name = "PORT", num_args = 0..=1, require_equals = true)]
    pub debug: Option<Option<u16>>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WATCHTEST_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Everything after `--` is forwarded verbatim to the test runner.
    #[arg(last = true, value_name = "RUNNER_ARGS")]
    pub runner_args: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
