// src/supervise/mod.rs

//! Supervision of the single verification (test-runner) process.
//!
//! This module ties together:
//! - the immutable launch description ([`directive`])
//! - process creation ([`launcher`])
//! - the pure supervision state machine ([`core`])
//! - the async IO shell driving it ([`supervisor`])
//! - subtree termination backends ([`kill`])
//!
//! The pure state machine lives in [`core`]; the async shell that owns
//! channels, the child handle, and OS side effects is implemented in
//! [`supervisor`].

pub mod core;
pub mod directive;
pub mod kill;
pub mod launcher;
pub mod supervisor;

pub use self::core::{
    SupervisionState, SupervisorCommand, SupervisorCore, SupervisorEvent, SupervisorStep,
};
pub use directive::{DebugSpec, LaunchDirective};
pub use kill::{SignalTerminator, SubtreeTerminator};
pub use launcher::{render_command, runner_args, ChildHandle, Launcher, ProcessLauncher};
pub use supervisor::{Supervisor, SupervisorHandle};
