// tests/supervisor_core.rs

//! Unit tests for the pure supervision state machine: no Tokio, no
//! channels, no processes.

use watchtest::supervise::{
    SupervisionState, SupervisorCommand, SupervisorCore, SupervisorEvent,
};

#[test]
fn build_success_from_idle_launches_once() {
    let mut core = SupervisorCore::new();

    let step = core.step(SupervisorEvent::BuildSucceeded);

    assert_eq!(step.commands, vec![SupervisorCommand::Launch]);
    assert!(step.keep_running);
    assert_eq!(core.state(), SupervisionState::Running);
}

#[test]
fn build_success_while_running_pauses_input_then_terminates() {
    let mut core = SupervisorCore::new();
    core.step(SupervisorEvent::BuildSucceeded);
    core.launch_started(101);

    let step = core.step(SupervisorEvent::BuildSucceeded);

    assert_eq!(
        step.commands,
        vec![
            SupervisorCommand::PauseInput { pid: 101 },
            SupervisorCommand::TerminateSubtree { pid: 101 },
        ]
    );
    assert_eq!(core.state(), SupervisionState::Restarting);
    // The old handle stays held until its exit event arrives.
    assert_eq!(core.child_pid(), Some(101));
}

#[test]
fn redundant_build_success_while_restarting_is_ignored() {
    let mut core = SupervisorCore::new();
    core.step(SupervisorEvent::BuildSucceeded);
    core.launch_started(101);
    core.step(SupervisorEvent::BuildSucceeded);

    // Second trigger while the restart is in flight: exactly one
    // terminate-then-relaunch cycle, not two racing ones.
    let step = core.step(SupervisorEvent::BuildSucceeded);

    assert!(step.commands.is_empty());
    assert_eq!(core.state(), SupervisionState::Restarting);
}

#[test]
fn exit_while_restarting_relaunches() {
    let mut core = SupervisorCore::new();
    core.step(SupervisorEvent::BuildSucceeded);
    core.launch_started(101);
    core.step(SupervisorEvent::BuildSucceeded);

    let step = core.step(SupervisorEvent::ChildExited { pid: 101 });

    assert_eq!(step.commands, vec![SupervisorCommand::Launch]);
    assert_eq!(core.state(), SupervisionState::Running);
}

#[test]
fn exit_while_running_returns_to_idle() {
    let mut core = SupervisorCore::new();
    core.step(SupervisorEvent::BuildSucceeded);
    core.launch_started(101);

    let step = core.step(SupervisorEvent::ChildExited { pid: 101 });

    assert!(step.commands.is_empty());
    assert_eq!(core.state(), SupervisionState::Idle);
    assert_eq!(core.child_pid(), None);
}

#[test]
fn stale_exit_notification_is_ignored() {
    let mut core = SupervisorCore::new();
    core.step(SupervisorEvent::BuildSucceeded);
    core.launch_started(101);

    // Exit of some earlier child that is no longer held.
    let step = core.step(SupervisorEvent::ChildExited { pid: 42 });

    assert!(step.commands.is_empty());
    assert_eq!(core.state(), SupervisionState::Running);
    assert_eq!(core.child_pid(), Some(101));
}

#[test]
fn shutdown_terminates_held_subtree_and_stops() {
    let mut core = SupervisorCore::new();
    core.step(SupervisorEvent::BuildSucceeded);
    core.launch_started(101);

    let step = core.step(SupervisorEvent::ShutdownRequested);

    assert_eq!(
        step.commands,
        vec![SupervisorCommand::TerminateSubtree { pid: 101 }]
    );
    assert!(!step.keep_running);
    assert_eq!(core.child_pid(), None);
}

#[test]
fn shutdown_with_no_child_stops_quietly() {
    let mut core = SupervisorCore::new();

    let step = core.step(SupervisorEvent::ShutdownRequested);

    assert!(step.commands.is_empty());
    assert!(!step.keep_running);
}

#[test]
fn launch_failure_returns_to_idle_and_allows_retry() {
    let mut core = SupervisorCore::new();
    core.step(SupervisorEvent::BuildSucceeded);
    core.launch_failed();

    assert_eq!(core.state(), SupervisionState::Idle);

    // Next build success attempts another launch.
    let step = core.step(SupervisorEvent::BuildSucceeded);
    assert_eq!(step.commands, vec![SupervisorCommand::Launch]);
    assert_eq!(core.state(), SupervisionState::Running);
}

#[test]
fn restart_cycle_ends_running_with_fresh_pid() {
    let mut core = SupervisorCore::new();
    core.step(SupervisorEvent::BuildSucceeded);
    core.launch_started(101);
    core.step(SupervisorEvent::BuildSucceeded);
    let step = core.step(SupervisorEvent::ChildExited { pid: 101 });
    assert_eq!(step.commands, vec![SupervisorCommand::Launch]);
    core.launch_started(102);

    assert_eq!(core.state(), SupervisionState::Running);
    assert_eq!(core.child_pid(), Some(102));
}
