// src/supervise/core.rs

//! Pure supervision state machine.
//!
//! This module contains a synchronous, deterministic core that consumes
//! [`SupervisorEvent`]s and produces:
//! - an updated supervision state
//! - a list of "commands" describing what the IO shell should do next
//!
//! The async/IO-heavy shell (`supervise::supervisor::Supervisor`) is
//! responsible for:
//! - reading events from the channel
//! - launching processes and holding the `ChildHandle`
//! - delivering termination signals
//!
//! The core is intended to be extensively unit tested without any Tokio,
//! channels, or OS processes. The invariant it enforces: at most one live
//! child at any time, and a new child is never launched while another is
//! still alive.

/// Current supervision state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisionState {
    /// No child held.
    Idle,
    /// One child held and alive.
    Running,
    /// The previous child has been signalled; waiting for its exit
    /// notification before launching a replacement.
    Restarting,
}

/// Events flowing into the supervisor from the build pipeline, exit waiters,
/// and signal handling.
#[derive(Debug, Clone)]
pub enum SupervisorEvent {
    /// The upstream build pipeline reported a successful compile.
    BuildSucceeded,
    /// An exit waiter observed the child with this pid exiting.
    ChildExited { pid: u32 },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupervisorCommand {
    /// Launch a new verification process from the stored directive.
    Launch,
    /// Drop the held child's stdin handle so it stops consuming terminal
    /// input while it is being torn down.
    PauseInput { pid: u32 },
    /// Send a termination signal to the process subtree rooted at `pid`.
    TerminateSubtree { pid: u32 },
}

/// Decision returned by the core after handling a single event.
#[derive(Debug, Clone)]
pub struct SupervisorStep {
    /// Commands the IO shell should execute, in order.
    pub commands: Vec<SupervisorCommand>,
    /// Whether the outer supervisor loop should keep running.
    pub keep_running: bool,
}

impl SupervisorStep {
    fn cont(commands: Vec<SupervisorCommand>) -> Self {
        Self {
            commands,
            keep_running: true,
        }
    }
}

/// Pure supervision state: the state tag plus the pid of the held child.
///
/// No channels, no Tokio types, no IO.
#[derive(Debug)]
pub struct SupervisorCore {
    state: SupervisionState,
    child_pid: Option<u32>,
}

impl Default for SupervisorCore {
    fn default() -> Self {
        Self::new()
    }
}

impl SupervisorCore {
    pub fn new() -> Self {
        Self {
            state: SupervisionState::Idle,
            child_pid: None,
        }
    }

    pub fn state(&self) -> SupervisionState {
        self.state
    }

    pub fn child_pid(&self) -> Option<u32> {
        self.child_pid
    }

    /// Handle a single event, updating state and returning the resulting
    /// commands for the IO shell.
    pub fn step(&mut self, event: SupervisorEvent) -> SupervisorStep {
        match event {
            SupervisorEvent::BuildSucceeded => self.handle_build_success(),
            SupervisorEvent::ChildExited { pid } => self.handle_child_exit(pid),
            SupervisorEvent::ShutdownRequested => self.handle_shutdown(),
        }
    }

    /// Record the pid of a child the shell just launched in response to a
    /// `Launch` command.
    pub fn launch_started(&mut self, pid: u32) {
        self.child_pid = Some(pid);
    }

    /// Record that a `Launch` command failed to spawn a process. No retry;
    /// the next `BuildSucceeded` tries again from `Idle`.
    pub fn launch_failed(&mut self) {
        self.child_pid = None;
        self.state = SupervisionState::Idle;
    }

    fn handle_build_success(&mut self) -> SupervisorStep {
        match (self.state, self.child_pid) {
            (SupervisionState::Idle, _) => {
                self.state = SupervisionState::Running;
                SupervisorStep::cont(vec![SupervisorCommand::Launch])
            }
            (SupervisionState::Running, Some(pid)) => {
                // Restart: signal the old subtree now, relaunch on its exit
                // event. The exit waiter was wired at spawn time, so the
                // relaunch cannot race ahead of the actual exit.
                self.state = SupervisionState::Restarting;
                SupervisorStep::cont(vec![
                    SupervisorCommand::PauseInput { pid },
                    SupervisorCommand::TerminateSubtree { pid },
                ])
            }
            // Running without a recorded pid means a launch is still being
            // executed in this same handler turn; treat as redundant.
            (SupervisionState::Running, None) => SupervisorStep::cont(Vec::new()),
            // A restart is already in flight; redundant trigger.
            (SupervisionState::Restarting, _) => SupervisorStep::cont(Vec::new()),
        }
    }

    fn handle_child_exit(&mut self, pid: u32) -> SupervisorStep {
        if self.child_pid != Some(pid) {
            // Stale notification from a child that is no longer held.
            return SupervisorStep::cont(Vec::new());
        }

        self.child_pid = None;
        match self.state {
            SupervisionState::Running => {
                // The child exited on its own; wait for the next build.
                self.state = SupervisionState::Idle;
                SupervisorStep::cont(Vec::new())
            }
            SupervisionState::Restarting => {
                self.state = SupervisionState::Running;
                SupervisorStep::cont(vec![SupervisorCommand::Launch])
            }
            SupervisionState::Idle => SupervisorStep::cont(Vec::new()),
        }
    }

    fn handle_shutdown(&mut self) -> SupervisorStep {
        // Fire-and-forget: the host is about to exit, so we signal the
        // subtree without waiting for confirmation.
        let commands = match self.child_pid.take() {
            Some(pid) => vec![SupervisorCommand::TerminateSubtree { pid }],
            None => Vec::new(),
        };
        self.state = SupervisionState::Idle;
        SupervisorStep {
            commands,
            keep_running: false,
        }
    }
}
