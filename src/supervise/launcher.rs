// src/supervise/launcher.rs

//! Process creation for the verification tool.
//!
//! The supervisor talks to a [`Launcher`] instead of spawning directly. This
//! makes it easy to swap in a fake launcher in tests while keeping the
//! production implementation here.
//!
//! - [`ProcessLauncher`] is the default implementation: it spawns the runner
//!   through the platform shell with stdio inherited, registers an exit
//!   waiter that reports `ChildExited` on the supervisor's event queue, and
//!   returns immediately.
//! - Tests can provide their own `Launcher` that hands out synthetic pids.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::{anyhow, Context};
use tokio::process::{ChildStdin, Command};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::supervise::core::SupervisorEvent;
use crate::supervise::directive::LaunchDirective;

/// Handle to one spawned verification process.
///
/// Owned exclusively by the supervisor shell; cleared when the matching exit
/// notification arrives.
#[derive(Debug)]
pub struct ChildHandle {
    pid: u32,
    stdin: Option<ChildStdin>,
}

impl ChildHandle {
    pub fn new(pid: u32, stdin: Option<ChildStdin>) -> Self {
        Self { pid, stdin }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Drop the child's stdin handle, if any, so the process stops
    /// competing for terminal input while it is torn down.
    pub fn silence_input(&mut self) {
        self.stdin.take();
    }
}

/// Trait abstracting how verification processes are created.
///
/// Production code uses [`ProcessLauncher`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait Launcher: Send {
    /// Start exactly one verification process for the given directive.
    ///
    /// Must not block until the process exits. The implementation is
    /// responsible for arranging a `ChildExited` event when it does.
    fn launch(
        &mut self,
        directive: LaunchDirective,
    ) -> Pin<Box<dyn Future<Output = Result<ChildHandle>> + Send + '_>>;
}

/// Build the runner's argument list from a directive.
///
/// Order: optional inspect flag first, then the target path (quoted when it
/// contains whitespace), then the pass-through arguments.
pub fn runner_args(directive: &LaunchDirective) -> Vec<String> {
    let path = directive.target_path.to_string_lossy();
    let path = if path.contains(' ') {
        format!("\"{path}\"")
    } else {
        path.into_owned()
    };

    let mut args = Vec::with_capacity(directive.pass_through.len() + 2);
    args.push(path);
    args.extend(directive.pass_through.iter().cloned());

    if let Some(debug) = directive.debug {
        args.insert(0, debug.inspect_flag());
    }

    args
}

/// Render the full shell command line for the runner.
pub fn render_command(runner: &str, directive: &LaunchDirective) -> String {
    let mut parts = Vec::with_capacity(directive.pass_through.len() + 3);
    parts.push(runner.to_string());
    parts.extend(runner_args(directive));
    parts.join(" ")
}

/// Real launcher used in production.
pub struct ProcessLauncher {
    runner: String,
    events_tx: mpsc::Sender<SupervisorEvent>,
}

impl ProcessLauncher {
    /// `runner` is the verification tool executable (the `runner` setting);
    /// `events_tx` receives `ChildExited` events from exit waiters.
    pub fn new(runner: String, events_tx: mpsc::Sender<SupervisorEvent>) -> Self {
        Self { runner, events_tx }
    }
}

impl Launcher for ProcessLauncher {
    fn launch(
        &mut self,
        directive: LaunchDirective,
    ) -> Pin<Box<dyn Future<Output = Result<ChildHandle>> + Send + '_>> {
        let command_line = render_command(&self.runner, &directive);
        let events_tx = self.events_tx.clone();

        Box::pin(async move {
            info!(cmd = %command_line, "starting verification process");

            // Go through the shell: the target path may need shell-style
            // expansion, and this matches how the build pipeline runs.
            let mut cmd = if cfg!(windows) {
                let mut c = Command::new("cmd");
                c.arg("/C").arg(&command_line);
                c
            } else {
                let mut c = Command::new("sh");
                c.arg("-c").arg(&command_line);
                c
            };

            cmd.stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());

            // Own process group, so the whole subtree (runners commonly fork
            // workers) can be signalled on restart.
            #[cfg(unix)]
            cmd.process_group(0);

            let mut child = cmd
                .spawn()
                .with_context(|| format!("spawning verification process '{command_line}'"))?;

            let pid = child
                .id()
                .ok_or_else(|| anyhow!("spawned verification process has no pid"))?;
            let stdin = child.stdin.take();

            // Exit waiter: wired before any termination signal can be sent,
            // so a restart can never miss the exit.
            tokio::spawn(async move {
                if let Err(e) = child.wait().await {
                    warn!(pid, error = %e, "waiting for verification process");
                }
                debug!(pid, "verification process exited");
                let _ = events_tx.send(SupervisorEvent::ChildExited { pid }).await;
            });

            Ok(ChildHandle::new(pid, stdin))
        })
    }
}
