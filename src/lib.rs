// src/lib.rs

pub mod build;
pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod supervise;

use std::path::Path;

use tokio::sync::mpsc;
use tracing::info;

use crate::cli::CliArgs;
use crate::errors::Result;
use crate::supervise::{
    DebugSpec, LaunchDirective, ProcessLauncher, SignalTerminator, Supervisor, SupervisorEvent,
    SupervisorHandle,
};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and setting resolution
/// - compiler-options lookup (output directory)
/// - the watch pipeline
/// - Ctrl-C handling
/// - the supervisor event loop
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = config::load_from_path(&args.config)?;
    let settings = config::resolve_settings(&cfg, args.app.as_deref(), args.path.as_deref())?;

    let compiler_opts = config::read_options(&settings.compiler_config_path)?;
    let out_dir = compiler_opts
        .out_dir
        .unwrap_or_else(|| settings.output_root.clone());
    let target_path = Path::new(&out_dir).join(&settings.test_root);

    let directive = LaunchDirective {
        target_path,
        debug: DebugSpec::from_cli(args.debug),
        pass_through: args.runner_args.clone(),
    };

    info!(
        target = %directive.target_path.display(),
        runner = %settings.runner,
        "resolved launch directive"
    );

    let (events_tx, events_rx) = mpsc::channel::<SupervisorEvent>(64);
    let handle = SupervisorHandle::new(events_tx.clone());

    // Ctrl-C → terminate any held subtree and stop.
    {
        let handle = handle.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            handle.shutdown().await;
        });
    }

    build::spawn_watch_pipeline(&settings.watch_command, &settings.success_pattern, handle)?;

    let launcher = ProcessLauncher::new(settings.runner.clone(), events_tx);
    let supervisor = Supervisor::new(directive, launcher, SignalTerminator, events_rx);
    supervisor.run().await
}
