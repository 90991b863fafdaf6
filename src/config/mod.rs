// src/config/mod.rs

//! Configuration loading and value resolution for watchtest.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load the project config file from disk (`loader.rs`).
//! - Resolve individual settings with layered precedence (`value.rs`).
//! - Read the compiler configuration file that determines the build output
//!   directory (`compiler.rs`).

pub mod compiler;
pub mod loader;
pub mod model;
pub mod value;

pub use compiler::{read_options, CompilerOptions};
pub use loader::load_from_path;
pub use model::{ConfigFile, SettingsSection};
pub use value::{get_value, resolve_settings, ResolvedSettings, SettingKey};
