// src/watch/mod.rs

//! File watching and incremental rebuild triggering.
//!
//! This module is responsible for:
//! - Declaring one watch rule per logical asset category, with compiled
//!   `watch` glob patterns (`rules.rs`).
//! - Wiring up a cross-platform filesystem watcher (`notify`) that maps
//!   change events to rules, waits for writes to settle, executes the
//!   rule's task chain and issues a reload notification (`watcher.rs`).
//!
//! Rules are stateless between triggers: a new event always starts the
//! rule's chain from the top, independent of any in-flight execution.
//! Concurrent rebuilds of unrelated categories are permitted and expected.

pub mod rules;
pub mod watcher;

pub use rules::{WatchRule, build_watch_rules};
pub use watcher::{WatcherHandle, spawn_watcher};
