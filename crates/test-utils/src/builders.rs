#![allow(dead_code)]

use std::path::PathBuf;

use watchtest::supervise::{DebugSpec, LaunchDirective};

/// Builder for `LaunchDirective` to simplify test setup.
pub struct DirectiveBuilder {
    target_path: PathBuf,
    debug: Option<DebugSpec>,
    pass_through: Vec<String>,
}

impl DirectiveBuilder {
    pub fn new(target: &str) -> Self {
        Self {
            target_path: PathBuf::from(target),
            debug: None,
            pass_through: Vec::new(),
        }
    }

    pub fn with_debug(mut self, debug: DebugSpec) -> Self {
        self.debug = Some(debug);
        self
    }

    pub fn with_arg(mut self, arg: &str) -> Self {
        self.pass_through.push(arg.to_string());
        self
    }

    pub fn build(self) -> LaunchDirective {
        LaunchDirective {
            target_path: self.target_path,
            debug: self.debug,
            pass_through: self.pass_through,
        }
    }
}

impl Default for DirectiveBuilder {
    fn default() -> Self {
        Self::new("dist/test")
    }
}
