// src/config/compiler.rs

//! Reader for the compiler configuration file named by the `path` setting.
//!
//! Only the output directory is consumed here; everything else in the file
//! belongs to the build pipeline.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::errors::Result;

#[derive(Debug, Clone, Default, Deserialize)]
struct CompilerConfigFile {
    #[serde(default)]
    compiler_options: CompilerOptions,
}

/// Compiler options relevant to supervision.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompilerOptions {
    /// Output directory the build writes to. When absent, the `root`
    /// setting from the project config is used instead.
    pub out_dir: Option<String>,
}

/// Read compiler options from the config file at `path`.
pub fn read_options(path: impl AsRef<Path>) -> Result<CompilerOptions> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: CompilerConfigFile = toml::from_str(&contents)?;

    Ok(config.compiler_options)
}
