// src/build/mod.rs

//! Upstream build pipeline collaborator.
//!
//! The supervisor only needs a source of build-success notifications; this
//! module provides one by running the configured watch-mode build command
//! and scanning its stdout for the success pattern.

pub mod pipeline;

pub use pipeline::spawn_watch_pipeline;
