// src/build/pipeline.rs

use std::process::Stdio;

use anyhow::Context;
use regex::Regex;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::{Result, WatchtestError};
use crate::supervise::SupervisorHandle;

/// Spawn the watch-mode build command and invoke the supervisor's
/// build-success hook once per stdout line matching `success_pattern`.
///
/// This is a fire-and-forget function: it spawns a background Tokio task
/// that owns the build process for the lifetime of the session. Build
/// stdout is echoed to the host's stdout so compiler diagnostics stay
/// visible; stderr is inherited directly.
pub fn spawn_watch_pipeline(
    watch_command: &str,
    success_pattern: &str,
    supervisor: SupervisorHandle,
) -> Result<()> {
    let pattern = Regex::new(success_pattern).map_err(|e| {
        WatchtestError::ConfigError(format!(
            "invalid success_pattern regex '{success_pattern}': {e}"
        ))
    })?;

    info!(cmd = %watch_command, pattern = %success_pattern, "starting watch pipeline");

    // Build a shell command appropriate for the platform.
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(watch_command);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(watch_command);
        c
    };

    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning watch pipeline '{watch_command}'"))?;

    let stdout = child
        .stdout
        .take()
        .context("watch pipeline has no stdout pipe")?;

    tokio::spawn(async move {
        let reader = BufReader::new(stdout);
        let mut lines = reader.lines();

        while let Ok(Some(line)) = lines.next_line().await {
            println!("{line}");

            if pattern.is_match(&line) {
                debug!("build success pattern matched");
                supervisor.on_build_success().await;
            }
        }

        // The watch command exiting usually means the session is over;
        // there is nothing to restart against any more.
        match child.wait().await {
            Ok(status) => warn!(%status, "watch pipeline exited"),
            Err(e) => warn!(error = %e, "waiting for watch pipeline"),
        }
    });

    Ok(())
}
