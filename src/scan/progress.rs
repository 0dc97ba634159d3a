// file: src/scan/progress.rs
// description: progress tracking and statistics for per-indexer capability scans
// reference: uses indicatif for progress bars and tracks scan counters

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    pub indexers_scanned: usize,
    pub indexers_matched: usize,
    pub duration_secs: u64,
}

impl ScanStats {
    pub fn match_rate(&self) -> f64 {
        if self.indexers_scanned == 0 {
            return 0.0;
        }
        (self.indexers_matched as f64 / self.indexers_scanned as f64) * 100.0
    }
}

pub struct ScanProgress {
    bar: ProgressBar,
    scanned: AtomicUsize,
    matched: AtomicUsize,
    start_time: Instant,
}

impl ScanProgress {
    pub fn with_color(total: usize, colored: bool) -> Self {
        Self::build(ProgressBar::new(total as u64), colored)
    }

    /// A tracker that counts without drawing anything.
    pub fn hidden(total: usize) -> Self {
        Self::build(
            ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::hidden()),
            false,
        )
    }

    fn build(bar: ProgressBar, colored: bool) -> Self {
        let template = if colored {
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}"
        } else {
            "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}"
        };

        if let Ok(style) = ProgressStyle::default_bar().template(template) {
            let chars = if colored { "█▓▒░" } else { "=>-" };
            bar.set_style(style.progress_chars(chars));
        }

        Self {
            bar,
            scanned: AtomicUsize::new(0),
            matched: AtomicUsize::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record(&self, name: &str, matched: bool) {
        self.scanned.fetch_add(1, Ordering::SeqCst);
        if matched {
            self.matched.fetch_add(1, Ordering::SeqCst);
        }
        self.bar.inc(1);
        self.bar.set_message(format!(
            "{} | matched: {}",
            name,
            self.matched.load(Ordering::SeqCst)
        ));
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn get_stats(&self) -> ScanStats {
        ScanStats {
            indexers_scanned: self.scanned.load(Ordering::SeqCst),
            indexers_matched: self.matched.load(Ordering::SeqCst),
            duration_secs: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Drop for ScanProgress {
    fn drop(&mut self) {
        self.finish();
    }
}
