// file: src/sync/planner.rs
// description: per indexer/target decision: add, or skip with a reason
// reference: name dedup followed by Newznab category matching

use crate::models::{JackettIndexer, supports_any};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyExists,
    UnsupportedCategories,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Add,
    Skip(SkipReason),
}

/// Existing names win over category checks, so an indexer added by hand with
/// the same name is never duplicated.
pub fn plan(
    indexer: &JackettIndexer,
    existing_names: &HashSet<String>,
    wanted: &[u32],
) -> Decision {
    if existing_names.contains(&indexer.name) {
        return Decision::Skip(SkipReason::AlreadyExists);
    }

    if !supports_any(&indexer.category_ids(), wanted) {
        return Decision::Skip(SkipReason::UnsupportedCategories);
    }

    Decision::Add
}
