// file: src/sync/mod.rs
// description: indexer synchronization module exports
// reference: internal module structure

mod planner;
mod runner;

pub use planner::{Decision, SkipReason, plan};
pub use runner::{SyncReport, SyncRunner, TargetReport};
