// tests/build_pipeline.rs

//! The watch pipeline turning stdout pattern matches into build-success
//! events, driven by real (short-lived) shell processes.

use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};

use watchtest::build::spawn_watch_pipeline;
use watchtest::errors::WatchtestError;
use watchtest::supervise::{SupervisorEvent, SupervisorHandle};
use watchtest_test_utils::{init_tracing, with_timeout};

#[tokio::test]
async fn matching_stdout_line_emits_build_success() {
    init_tracing();

    let (tx, mut rx) = mpsc::channel::<SupervisorEvent>(8);
    let handle = SupervisorHandle::new(tx);

    spawn_watch_pipeline("echo 'Found 0 errors. Watching for file changes.'", "Found 0 errors", handle)
        .unwrap();

    let event = with_timeout(rx.recv()).await;
    assert!(matches!(event, Some(SupervisorEvent::BuildSucceeded)));
}

#[tokio::test]
async fn one_event_per_matching_line() {
    init_tracing();

    let (tx, mut rx) = mpsc::channel::<SupervisorEvent>(8);
    let handle = SupervisorHandle::new(tx);

    spawn_watch_pipeline("printf 'compiled\\nnoise\\ncompiled\\n'", "compiled", handle).unwrap();

    assert!(matches!(
        with_timeout(rx.recv()).await,
        Some(SupervisorEvent::BuildSucceeded)
    ));
    assert!(matches!(
        with_timeout(rx.recv()).await,
        Some(SupervisorEvent::BuildSucceeded)
    ));
    // The pipeline has exited; its sender is dropped, so the channel drains.
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn non_matching_output_emits_nothing() {
    init_tracing();

    let (tx, mut rx) = mpsc::channel::<SupervisorEvent>(8);
    let handle = SupervisorHandle::new(tx);

    spawn_watch_pipeline("echo 'error TS2304'", "Found 0 errors", handle).unwrap();

    let got = timeout(Duration::from_millis(500), rx.recv()).await;
    // Either the channel closed without an event or the wait timed out.
    assert!(matches!(got, Ok(None) | Err(_)));
}

#[tokio::test]
async fn invalid_success_pattern_is_a_config_error() {
    init_tracing();

    let (tx, _rx) = mpsc::channel::<SupervisorEvent>(8);
    let handle = SupervisorHandle::new(tx);

    let err = spawn_watch_pipeline("echo hi", "([unclosed", handle).unwrap_err();
    assert!(matches!(err, WatchtestError::ConfigError(_)));
}
