use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use watchtest::errors::Result;
use watchtest::supervise::{ChildHandle, LaunchDirective, Launcher, SubtreeTerminator};

/// Shared record of what a [`FakeLauncher`] was asked to do.
#[derive(Debug, Default)]
pub struct LaunchLog {
    /// Directives in launch order.
    pub directives: Vec<LaunchDirective>,
    /// Synthetic pids handed out, in launch order (101, 102, ...).
    pub pids: Vec<u32>,
}

/// A fake launcher that records every directive and hands out synthetic
/// pids without spawning real processes.
///
/// Exit events are *not* produced automatically; tests feed
/// `SupervisorEvent::ChildExited` into the supervisor channel themselves to
/// control exact ordering.
pub struct FakeLauncher {
    next_pid: u32,
    fail_remaining: usize,
    log: Arc<Mutex<LaunchLog>>,
}

impl FakeLauncher {
    pub fn new(log: Arc<Mutex<LaunchLog>>) -> Self {
        Self {
            next_pid: 100,
            fail_remaining: 0,
            log,
        }
    }

    /// Make the next `n` launch attempts fail before any succeed.
    pub fn failing_first(mut self, n: usize) -> Self {
        self.fail_remaining = n;
        self
    }
}

impl Launcher for FakeLauncher {
    fn launch(
        &mut self,
        directive: LaunchDirective,
    ) -> Pin<Box<dyn Future<Output = Result<ChildHandle>> + Send + '_>> {
        if self.fail_remaining > 0 {
            self.fail_remaining -= 1;
            return Box::pin(async {
                Err(anyhow::anyhow!("fake launch failure").into())
            });
        }

        self.next_pid += 1;
        let pid = self.next_pid;
        let log = Arc::clone(&self.log);

        Box::pin(async move {
            {
                let mut guard = log.lock().unwrap();
                guard.directives.push(directive);
                guard.pids.push(pid);
            }
            Ok(ChildHandle::new(pid, None))
        })
    }
}

/// A terminator that records pids instead of signalling anything.
#[derive(Debug, Clone, Default)]
pub struct RecordingTerminator {
    pub terminated: Arc<Mutex<Vec<u32>>>,
}

impl SubtreeTerminator for RecordingTerminator {
    fn terminate(&mut self, pid: u32) {
        self.terminated.lock().unwrap().push(pid);
    }
}
