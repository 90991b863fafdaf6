// tests/config_values.rs

//! Setting resolution and config-file loading.

use std::io::Write;

use tempfile::NamedTempFile;

use watchtest::config::{
    get_value, load_from_path, read_options, resolve_settings, ConfigFile, SettingKey,
    SettingsSection,
};
use watchtest::errors::WatchtestError;

fn config_with(default: SettingsSection, app: Option<(&str, SettingsSection)>) -> ConfigFile {
    let mut cfg = ConfigFile {
        default,
        ..Default::default()
    };
    if let Some((name, section)) = app {
        cfg.app.insert(name.to_string(), section);
    }
    cfg
}

#[test]
fn cli_override_beats_app_and_default() {
    let cfg = config_with(
        SettingsSection {
            path: Some("default.toml".into()),
            ..Default::default()
        },
        Some((
            "api",
            SettingsSection {
                path: Some("api.toml".into()),
                ..Default::default()
            },
        )),
    );

    let value = get_value(
        &cfg,
        SettingKey::CompilerConfigPath,
        Some("api"),
        Some("cli.toml"),
    );
    assert_eq!(value.as_deref(), Some("cli.toml"));
}

#[test]
fn app_section_beats_default_section() {
    let cfg = config_with(
        SettingsSection {
            root: Some("dist".into()),
            ..Default::default()
        },
        Some((
            "api",
            SettingsSection {
                root: Some("dist/apps/api".into()),
                ..Default::default()
            },
        )),
    );

    let value = get_value(&cfg, SettingKey::OutputRoot, Some("api"), None);
    assert_eq!(value.as_deref(), Some("dist/apps/api"));
}

#[test]
fn default_section_beats_builtin() {
    let cfg = config_with(
        SettingsSection {
            runner: Some("vitest".into()),
            ..Default::default()
        },
        None,
    );

    let value = get_value(&cfg, SettingKey::Runner, None, None);
    assert_eq!(value.as_deref(), Some("vitest"));
}

#[test]
fn builtin_defaults_fill_unset_keys() {
    let cfg = config_with(
        SettingsSection {
            watch_command: Some("make watch".into()),
            ..Default::default()
        },
        None,
    );

    let settings = resolve_settings(&cfg, None, None).unwrap();
    assert_eq!(settings.runner, "jest");
    assert_eq!(settings.output_root, "dist");
    assert_eq!(settings.test_root, "test");
    assert_eq!(settings.success_pattern, "Found 0 errors");
    assert_eq!(settings.watch_command, "make watch");
}

#[test]
fn missing_watch_command_is_a_config_error() {
    let cfg = ConfigFile::default();

    let err = resolve_settings(&cfg, None, None).unwrap_err();
    assert!(matches!(err, WatchtestError::ConfigError(_)));
    assert!(err.to_string().contains("watch_command"));
}

#[test]
fn unknown_app_is_rejected() {
    let cfg = config_with(
        SettingsSection {
            watch_command: Some("make watch".into()),
            ..Default::default()
        },
        None,
    );

    let err = resolve_settings(&cfg, Some("nope"), None).unwrap_err();
    assert!(matches!(err, WatchtestError::AppNotFound(name) if name == "nope"));
}

#[test]
fn loads_config_file_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[default]
watch_command = "tsc --watch"
success_pattern = "Found 0 errors"

[app.api]
root = "dist/apps/api"
"#
    )
    .unwrap();

    let cfg = load_from_path(file.path()).unwrap();
    assert_eq!(cfg.default.watch_command.as_deref(), Some("tsc --watch"));
    assert_eq!(
        cfg.app.get("api").and_then(|s| s.root.as_deref()),
        Some("dist/apps/api")
    );
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[default\nwatch_command =").unwrap();

    let err = load_from_path(file.path()).unwrap_err();
    assert!(matches!(err, WatchtestError::TomlError(_)));
}

#[test]
fn missing_config_file_is_an_io_error() {
    let err = load_from_path("/definitely/not/a/real/Watchtest.toml").unwrap_err();
    assert!(matches!(err, WatchtestError::IoError(_)));
}

#[test]
fn compiler_options_out_dir_is_read() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[compiler_options]
out_dir = "build/output"
"#
    )
    .unwrap();

    let opts = read_options(file.path()).unwrap();
    assert_eq!(opts.out_dir.as_deref(), Some("build/output"));
}

#[test]
fn compiler_options_table_is_optional() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "# build settings live elsewhere").unwrap();

    let opts = read_options(file.path()).unwrap();
    assert_eq!(opts.out_dir, None);
}
