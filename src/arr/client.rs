// file: src/arr/client.rs
// description: REST client for the indexer endpoints of Sonarr, Radarr and Listenarr
// reference: https://sonarr.tv/docs/api/

use crate::arr::{AuthStrategy, TargetKind};
use crate::config::TargetConfig;
use crate::error::{Result, SyncError};
use crate::models::{ExistingIndexer, IndexerResource, SystemStatus};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct ArrClient {
    client: Client,
    kind: TargetKind,
    base_url: String,
    api_key: String,
}

impl ArrClient {
    pub fn new(
        kind: TargetKind,
        target: &TargetConfig,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = join_api_path(&target.url, &target.api_path);

        Ok(Self {
            client,
            kind,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Lists indexers already registered in the target. A failure is logged
    /// and reported as an empty list so the sync can still proceed.
    pub async fn existing_indexers(&self) -> Vec<ExistingIndexer> {
        match self.fetch_existing().await {
            Ok(indexers) => {
                debug!("{} has {} indexers", self.kind, indexers.len());
                indexers
            }
            Err(e) => {
                warn!("Could not list {} indexers: {}", self.kind, e);
                Vec::new()
            }
        }
    }

    async fn fetch_existing(&self) -> Result<Vec<ExistingIndexer>> {
        let response = self
            .client
            .get(self.endpoint("indexer"))
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::api(self.kind.to_string(), status, body));
        }

        Ok(response.json().await?)
    }

    /// Creates an indexer, walking the authentication fallback order until one
    /// method is accepted.
    pub async fn create_indexer(&self, resource: &IndexerResource) -> Result<AuthStrategy> {
        let url = self.endpoint("indexer");
        let mut rejected = Vec::new();

        for strategy in AuthStrategy::FALLBACK_ORDER {
            let request = strategy.apply(self.client.post(&url), &self.api_key);
            let response = request.json(resource).send().await?;
            let status = response.status();

            if status.is_success() {
                debug!(
                    "{} accepted \"{}\" using {} auth",
                    self.kind, resource.name, strategy
                );
                return Ok(strategy);
            }

            let body = response.text().await.unwrap_or_default();

            if AuthStrategy::should_fall_back(status) {
                debug!("{} rejected {} auth ({})", self.kind, strategy, status);
                rejected.push(format!("{}: {}", strategy, status.as_u16()));
                continue;
            }

            return Err(SyncError::api(self.kind.to_string(), status, body));
        }

        Err(SyncError::AuthRejected {
            service: self.kind.to_string(),
            attempts: rejected.join(", "),
        })
    }

    pub async fn ping(&self) -> Result<SystemStatus> {
        let response = self
            .client
            .get(self.endpoint("system/status"))
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::api(self.kind.to_string(), status, body));
        }

        Ok(response.json().await?)
    }
}

fn join_api_path(url: &str, api_path: &str) -> String {
    let url = url.trim_end_matches('/');
    match api_path.trim_matches('/') {
        "" => url.to_string(),
        path => format!("{}/{}", url, path),
    }
}
