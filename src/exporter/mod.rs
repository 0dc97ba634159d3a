// file: src/exporter/mod.rs
// description: export module exports
// reference: internal module structure

pub mod tsv;

pub use tsv::{TSV_HEADER, TsvExporter, TsvRow};
