// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod arr;
pub mod category;
pub mod jackett;

pub use arr::{ExistingIndexer, Field, IndexerResource, SystemStatus};
pub use category::{CategoryProfile, join_ids, supports_any};
pub use jackett::{Category, IndexerConfig, JackettIndexer, ServerConfig, parse_indexer_list};
