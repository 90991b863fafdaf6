// src/supervise/kill.rs

//! Subtree termination backends.
//!
//! Children are spawned in their own process group (see
//! `launcher::ProcessLauncher`), so terminating "the subtree rooted at a
//! pid" is a single group-level operation per platform. Delivery failures
//! (process already gone, permissions) are treated as already-terminated:
//! the supervisor only needs convergence, not acknowledgment.

use tracing::debug;

/// Abstract operation: send a termination signal to the process subtree
/// rooted at `pid`. Fire-and-forget.
pub trait SubtreeTerminator: Send {
    fn terminate(&mut self, pid: u32);
}

/// Platform-backed terminator used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct SignalTerminator;

impl SubtreeTerminator for SignalTerminator {
    fn terminate(&mut self, pid: u32) {
        terminate_subtree(pid);
    }
}

#[cfg(unix)]
pub fn terminate_subtree(pid: u32) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    if let Err(e) = killpg(Pid::from_raw(pid as i32), Signal::SIGTERM) {
        debug!(pid, error = %e, "killpg failed; treating subtree as already terminated");
    }
}

#[cfg(windows)]
pub fn terminate_subtree(pid: u32) {
    use std::process::{Command, Stdio};

    let spawned = Command::new("taskkill")
        .args(["/PID", &pid.to_string(), "/T", "/F"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    if let Err(e) = spawned {
        debug!(pid, error = %e, "taskkill failed; treating subtree as already terminated");
    }
}
