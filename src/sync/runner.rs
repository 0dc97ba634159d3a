// file: src/sync/runner.rs
// description: walks Jackett indexers and creates the missing ones in each target
// reference: sequential per-indexer processing with per-target counters

use crate::arr::{ArrClient, TargetKind};
use crate::jackett::torznab_url;
use crate::models::{IndexerResource, JackettIndexer};
use crate::sync::planner::{Decision, SkipReason, plan};
use crate::utils::logging::{format_error, format_info, format_success};
use std::collections::HashSet;
use tracing::{error, info};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetReport {
    pub added: usize,
    pub skipped_existing: usize,
    pub skipped_categories: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub dry_run: bool,
    pub targets: Vec<(TargetKind, TargetReport)>,
}

impl SyncReport {
    pub fn target(&self, kind: TargetKind) -> Option<&TargetReport> {
        self.targets
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, report)| report)
    }

    pub fn total_failed(&self) -> usize {
        self.targets.iter().map(|(_, r)| r.failed).sum()
    }

    pub fn format(&self) -> String {
        let mut output = String::new();
        let verb = if self.dry_run { "would be added" } else { "added" };

        for (kind, report) in &self.targets {
            output.push_str(&format!(
                "   {}: {} new indexers {}",
                kind, report.added, verb
            ));
            if report.failed > 0 {
                output.push_str(&format!(", {} failed", report.failed));
            }
            output.push_str(&format!(
                " ({} already present, {} without matching categories)\n",
                report.skipped_existing, report.skipped_categories
            ));
        }

        output
    }
}

struct SyncTarget {
    client: ArrClient,
    categories: Vec<u32>,
    priority: i32,
    existing: HashSet<String>,
    report: TargetReport,
}

pub struct SyncRunner {
    jackett_url: String,
    torznab_api_key: Option<String>,
    dry_run: bool,
    targets: Vec<SyncTarget>,
}

impl SyncRunner {
    pub fn new(jackett_url: &str, torznab_api_key: Option<String>, dry_run: bool) -> Self {
        Self {
            jackett_url: jackett_url.to_string(),
            torznab_api_key,
            dry_run,
            targets: Vec::new(),
        }
    }

    /// Registers a target and loads the names it already knows.
    pub async fn add_target(&mut self, client: ArrClient, categories: Vec<u32>, priority: i32) {
        let existing = client
            .existing_indexers()
            .await
            .into_iter()
            .map(|indexer| indexer.name)
            .collect();

        self.targets.push(SyncTarget {
            client,
            categories,
            priority,
            existing,
            report: TargetReport::default(),
        });
    }

    pub async fn run(mut self, indexers: &[JackettIndexer]) -> SyncReport {
        for indexer in indexers {
            info!("Processing: {} ({})", indexer.name, indexer.id);

            for target in &mut self.targets {
                process(
                    target,
                    indexer,
                    &self.jackett_url,
                    self.torznab_api_key.as_deref(),
                    self.dry_run,
                )
                .await;
            }
        }

        SyncReport {
            dry_run: self.dry_run,
            targets: self
                .targets
                .into_iter()
                .map(|t| (t.client.kind(), t.report))
                .collect(),
        }
    }
}

async fn process(
    target: &mut SyncTarget,
    indexer: &JackettIndexer,
    jackett_url: &str,
    api_key: Option<&str>,
    dry_run: bool,
) {
    let kind = target.client.kind();

    match plan(indexer, &target.existing, &target.categories) {
        Decision::Skip(SkipReason::AlreadyExists) => {
            info!("  Already in {}, skipping", kind);
            target.report.skipped_existing += 1;
        }
        Decision::Skip(SkipReason::UnsupportedCategories) => {
            info!(
                "  Doesn't support {} categories, skipping {}",
                kind.profile(),
                kind
            );
            target.report.skipped_categories += 1;
        }
        Decision::Add => {
            let base_url = torznab_url(jackett_url, &indexer.id);

            if dry_run {
                info!(
                    "  {}",
                    format_info(&format!(
                        "[DRY RUN] Would add \"{}\" to {} (base URL: {})",
                        indexer.name, kind, base_url
                    ))
                );
                target.report.added += 1;
                target.existing.insert(indexer.name.clone());
                return;
            }

            let resource = IndexerResource::torznab(
                &indexer.name,
                &base_url,
                api_key,
                &target.categories,
                target.priority,
            );

            match target.client.create_indexer(&resource).await {
                Ok(_) => {
                    info!(
                        "  {}",
                        format_success(&format!("Added \"{}\" to {}", indexer.name, kind))
                    );
                    target.report.added += 1;
                    target.existing.insert(indexer.name.clone());
                }
                Err(e) => {
                    error!(
                        "  {}",
                        format_error(&format!("Error adding to {}: {}", kind, e))
                    );
                    target.report.failed += 1;
                }
            }
        }
    }
}
