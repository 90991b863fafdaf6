// src/config/value.rs

//! Layered setting resolution.
//!
//! Precedence, highest first:
//! 1. CLI flag override (currently only `--path`)
//! 2. `[app.<name>]` section
//! 3. `[default]` section
//! 4. built-in default
//!
//! Resolution is deterministic for a given input set; no environment or
//! filesystem state is consulted here.

use crate::config::model::{ConfigFile, SettingsSection};
use crate::errors::{Result, WatchtestError};

/// Named settings resolvable through [`get_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    CompilerConfigPath,
    OutputRoot,
    TestRoot,
    Runner,
    WatchCommand,
    SuccessPattern,
}

impl SettingKey {
    fn pick(self, section: &SettingsSection) -> Option<&str> {
        let field = match self {
            SettingKey::CompilerConfigPath => &section.path,
            SettingKey::OutputRoot => &section.root,
            SettingKey::TestRoot => &section.test_root,
            SettingKey::Runner => &section.runner,
            SettingKey::WatchCommand => &section.watch_command,
            SettingKey::SuccessPattern => &section.success_pattern,
        };
        field.as_deref()
    }

    fn builtin(self) -> Option<&'static str> {
        match self {
            SettingKey::CompilerConfigPath => Some("build.toml"),
            SettingKey::OutputRoot => Some("dist"),
            SettingKey::TestRoot => Some("test"),
            SettingKey::Runner => Some("jest"),
            // The watch command is project-specific; there is nothing
            // sensible to fall back to.
            SettingKey::WatchCommand => None,
            SettingKey::SuccessPattern => Some("Found 0 errors"),
        }
    }
}

/// Resolve a single setting, honoring CLI override > per-app > default >
/// built-in.
///
/// `app` must already be validated to exist (see [`resolve_settings`]);
/// an unknown app name here simply resolves as if no app was given.
pub fn get_value(
    cfg: &ConfigFile,
    key: SettingKey,
    app: Option<&str>,
    cli_override: Option<&str>,
) -> Option<String> {
    if let Some(v) = cli_override {
        return Some(v.to_string());
    }
    if let Some(section) = app.and_then(|name| cfg.app.get(name)) {
        if let Some(v) = key.pick(section) {
            return Some(v.to_string());
        }
    }
    if let Some(v) = key.pick(&cfg.default) {
        return Some(v.to_string());
    }
    key.builtin().map(str::to_string)
}

/// The full set of settings the rest of the tool consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub compiler_config_path: String,
    pub output_root: String,
    pub test_root: String,
    pub runner: String,
    pub watch_command: String,
    pub success_pattern: String,
}

/// Resolve every setting for the given app (if any).
///
/// Fails when an explicitly named app has no `[app.<name>]` section, or when
/// no `watch_command` is configured anywhere.
pub fn resolve_settings(
    cfg: &ConfigFile,
    app: Option<&str>,
    cli_compiler_path: Option<&str>,
) -> Result<ResolvedSettings> {
    if let Some(name) = app {
        if !cfg.app.contains_key(name) {
            return Err(WatchtestError::AppNotFound(name.to_string()));
        }
    }

    let require = |key: SettingKey, cli: Option<&str>, what: &str| {
        get_value(cfg, key, app, cli).ok_or_else(|| {
            WatchtestError::ConfigError(format!(
                "missing '{what}' (set it in [default] or [app.<name>])"
            ))
        })
    };

    Ok(ResolvedSettings {
        compiler_config_path: require(
            SettingKey::CompilerConfigPath,
            cli_compiler_path,
            "path",
        )?,
        output_root: require(SettingKey::OutputRoot, None, "root")?,
        test_root: require(SettingKey::TestRoot, None, "test_root")?,
        runner: require(SettingKey::Runner, None, "runner")?,
        watch_command: require(SettingKey::WatchCommand, None, "watch_command")?,
        success_pattern: require(SettingKey::SuccessPattern, None, "success_pattern")?,
    })
}
