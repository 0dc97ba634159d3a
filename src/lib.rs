// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod arr;
pub mod config;
pub mod error;
pub mod exporter;
pub mod jackett;
pub mod models;
pub mod scan;
pub mod sync;
pub mod utils;

pub use arr::{ArrClient, AuthStrategy, TargetKind};
pub use config::{CategoryConfig, Config, ExportConfig, JackettConfig, TargetConfig};
pub use error::{Result, SyncError};
pub use exporter::{TsvExporter, TsvRow};
pub use jackett::{JackettAuth, JackettClient};
pub use models::{CategoryProfile, IndexerResource, JackettIndexer};
pub use scan::{CategoryScanner, ScanMatch, ScanProgress, ScanStats};
pub use sync::{SyncReport, SyncRunner, TargetReport};
pub use utils::{HealthCheck, HealthReport, HealthStatus, OperationTimer, Validator};
