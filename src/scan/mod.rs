// file: src/scan/mod.rs
// description: category scan module exports
// reference: internal module structure

mod progress;
mod scanner;

pub use progress::{ScanProgress, ScanStats};
pub use scanner::{CategoryScanner, ScanMatch};
