// src/supervise/supervisor.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::errors::Result;
use crate::supervise::core::{SupervisorCommand, SupervisorCore, SupervisorEvent};
use crate::supervise::directive::LaunchDirective;
use crate::supervise::kill::SubtreeTerminator;
use crate::supervise::launcher::{ChildHandle, Launcher};

/// Cloneable handle exposing the supervisor's two external hooks.
///
/// `on_build_success` is the registration point handed to the build
/// pipeline; `shutdown` is the host-exit path (Ctrl-C handler).
#[derive(Debug, Clone)]
pub struct SupervisorHandle {
    tx: mpsc::Sender<SupervisorEvent>,
}

impl SupervisorHandle {
    pub fn new(tx: mpsc::Sender<SupervisorEvent>) -> Self {
        Self { tx }
    }

    /// Hook invoked once per successful build. Never fails: if the
    /// supervisor is gone the event is simply dropped.
    pub async fn on_build_success(&self) {
        let _ = self.tx.send(SupervisorEvent::BuildSucceeded).await;
    }

    /// Request shutdown. Idempotent; must never fail during host exit.
    pub async fn shutdown(&self) {
        let _ = self.tx.send(SupervisorEvent::ShutdownRequested).await;
    }
}

/// Drives the supervision state machine in response to `SupervisorEvent`s,
/// delegating process creation to a [`Launcher`] and subtree signalling to a
/// [`SubtreeTerminator`].
///
/// This is a pure IO shell around [`SupervisorCore`], which contains all the
/// transition semantics. All events are consumed from one channel and each
/// handler runs to completion, so the single child slot is never touched
/// concurrently.
pub struct Supervisor<L: Launcher, T: SubtreeTerminator> {
    core: SupervisorCore,
    directive: LaunchDirective,
    launcher: L,
    terminator: T,
    child: Option<ChildHandle>,
    events_rx: mpsc::Receiver<SupervisorEvent>,
}

impl<L: Launcher, T: SubtreeTerminator> fmt::Debug for Supervisor<L, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Supervisor")
            .field("core", &self.core)
            .field("directive", &self.directive)
            .finish_non_exhaustive()
    }
}

impl<L: Launcher, T: SubtreeTerminator> Supervisor<L, T> {
    pub fn new(
        directive: LaunchDirective,
        launcher: L,
        terminator: T,
        events_rx: mpsc::Receiver<SupervisorEvent>,
    ) -> Self {
        Self {
            core: SupervisorCore::new(),
            directive,
            launcher,
            terminator,
            child: None,
            events_rx,
        }
    }

    /// Main event loop.
    ///
    /// - Consumes `SupervisorEvent`s from the channel.
    /// - Feeds them into the pure core.
    /// - Executes the commands the core returns (launch, pause input,
    ///   terminate subtree).
    pub async fn run(mut self) -> Result<()> {
        info!("supervisor started");

        loop {
            let event = match self.events_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("supervisor event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, state = ?self.core.state(), "supervisor received event");

            // Free the child slot for an exit matching the held handle
            // before stepping, so a relaunch command finds it empty.
            if let SupervisorEvent::ChildExited { pid } = event {
                if self.child.as_ref().map(ChildHandle::pid) == Some(pid) {
                    self.child = None;
                }
            }

            let step = self.core.step(event);

            for command in step.commands {
                self.execute_command(command).await;
            }

            if !step.keep_running {
                info!("supervisor loop stopping");
                break;
            }
        }

        // Host exit with the loop gone another way (channel closed): reclaim
        // any subtree still held. Fire-and-forget.
        if let Some(pid) = self.core.child_pid() {
            self.terminator.terminate(pid);
        }

        Ok(())
    }

    /// Execute a single command from the core. Lifecycle errors are logged
    /// and absorbed; they never end the watch session.
    async fn execute_command(&mut self, command: SupervisorCommand) {
        match command {
            SupervisorCommand::Launch => self.launch().await,
            SupervisorCommand::PauseInput { pid } => {
                if let Some(child) = self.child.as_mut() {
                    if child.pid() == pid {
                        child.silence_input();
                    }
                }
            }
            SupervisorCommand::TerminateSubtree { pid } => {
                debug!(pid, "terminating verification process subtree");
                self.terminator.terminate(pid);
            }
        }
    }

    async fn launch(&mut self) {
        match self.launcher.launch(self.directive.clone()).await {
            Ok(handle) => {
                info!(pid = handle.pid(), "verification process running");
                self.core.launch_started(handle.pid());
                self.child = Some(handle);
            }
            Err(err) => {
                // Reported once, no retry; the next successful build will
                // attempt another launch.
                error!(error = %err, "failed to launch verification process");
                self.core.launch_failed();
            }
        }
    }
}
