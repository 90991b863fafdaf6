// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [default]
/// path = "build.toml"
/// root = "dist"
/// test_root = "test"
/// runner = "jest"
/// watch_command = "tsc --watch --preserveWatchOutput"
/// success_pattern = "Found 0 errors"
///
/// [app.api]
/// root = "dist/apps/api"
/// ```
///
/// Both sections are optional; per-app sections override `[default]`, which
/// in turn overrides built-in defaults (see `value.rs`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Project-wide settings from `[default]`.
    #[serde(default)]
    pub default: SettingsSection,

    /// Per-app overrides from `[app.<name>]`.
    ///
    /// Keys are the *app names* (e.g. `"api"`, `"worker"`).
    #[serde(default)]
    pub app: BTreeMap<String, SettingsSection>,
}

/// Settings available both globally (`[default]`) and per app (`[app.X]`).
///
/// Every field is optional; resolution happens in `value::get_value`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsSection {
    /// Path to the compiler configuration file (overridable with `--path`).
    pub path: Option<String>,

    /// Build output directory, used when the compiler config does not name
    /// an output directory itself.
    pub root: Option<String>,

    /// Subdirectory of the output directory handed to the test runner.
    pub test_root: Option<String>,

    /// Executable used as the verification tool.
    pub runner: Option<String>,

    /// Watch-mode build command whose stdout is scanned for successful
    /// compiles. Required (no built-in default).
    pub watch_command: Option<String>,

    /// Regex matched against each watch-command stdout line; a match counts
    /// as one successful build.
    pub success_pattern: Option<String>,
}
