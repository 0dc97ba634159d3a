// file: src/scan/scanner.rs
// description: finds indexers that support a category by querying each indexer's config
// reference: bounded-concurrency stream processing with futures::buffer_unordered

use crate::jackett::JackettClient;
use crate::models::{JackettIndexer, supports_any};
use crate::scan::ScanProgress;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanMatch {
    pub id: String,
    pub name: String,
    pub link: String,
    pub categories: Vec<u32>,
    pub torznab_url: String,
}

pub struct CategoryScanner<'a> {
    client: &'a JackettClient,
    concurrency: usize,
}

impl<'a> CategoryScanner<'a> {
    pub fn new(client: &'a JackettClient, concurrency: usize) -> Self {
        Self {
            client,
            concurrency: concurrency.max(1),
        }
    }

    /// Returns matches in the order Jackett listed the indexers.
    pub async fn scan(
        &self,
        indexers: &[JackettIndexer],
        wanted: &[u32],
        progress: &ScanProgress,
    ) -> Vec<ScanMatch> {
        let client = self.client;

        let mut results = stream::iter(indexers.iter().enumerate().map(|(position, indexer)| {
            async move {
                let config = client.indexer_config(&indexer.id).await;

                // The listing's caps cover indexers whose config lacks them
                let categories = if config.caps.is_empty() {
                    indexer.category_ids()
                } else {
                    config.category_ids()
                };

                let matched = supports_any(&categories, wanted);
                progress.record(&indexer.name, matched);
                debug!(
                    "{}: {} categories, match={}",
                    indexer.id,
                    categories.len(),
                    matched
                );

                (position, indexer, categories, matched)
            }
        }))
        .buffer_unordered(self.concurrency)
        .collect::<Vec<_>>()
        .await;

        results.sort_by_key(|(position, ..)| *position);

        results
            .into_iter()
            .filter(|(.., matched)| *matched)
            .map(|(_, indexer, categories, _)| ScanMatch {
                id: indexer.id.clone(),
                name: indexer.name.clone(),
                link: indexer.link.clone(),
                categories,
                torznab_url: self.client.torznab_url(&indexer.id),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_config(server: &MockServer, id: &str, caps: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/v2.0/indexers/{}/config", id)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "caps": caps })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_scan_keeps_order_and_filters() {
        let server = MockServer::start().await;

        let audiobook = json!({ "ID": "3030", "Name": "Audio/Audiobook" });
        let ebook = json!({ "ID": "7020", "Name": "Books/EBook" });

        mount_config(&server, "audiobookbay", json!([audiobook.clone()])).await;
        mount_config(&server, "eztv", json!([{ "ID": "5000", "Name": "TV" }])).await;
        mount_config(&server, "myanonamouse", json!([audiobook, ebook])).await;

        let mut config = Config::default_config().jackett;
        config.url = server.uri();
        config.api_key = Some("k".to_string());
        let client = JackettClient::connect(&config).await.unwrap();

        let indexers: Vec<JackettIndexer> = serde_json::from_value(json!([
            { "id": "audiobookbay", "name": "AudioBook Bay", "link": "https://audiobookbay.is/" },
            { "id": "eztv", "name": "EZTV" },
            { "id": "myanonamouse", "name": "MyAnonamouse" },
            { "id": "offline", "name": "Offline", "caps": [{ "ID": "3030", "Name": "Audio/Audiobook" }] }
        ]))
        .unwrap();

        let progress = ScanProgress::hidden(indexers.len());
        let matches = CategoryScanner::new(&client, 2)
            .scan(&indexers, &[3030], &progress)
            .await;

        let ids: Vec<_> = matches.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["audiobookbay", "myanonamouse", "offline"]);
        assert_eq!(matches[1].categories, vec![3030, 7020]);
        assert_eq!(
            matches[0].torznab_url,
            format!("{}/api/v2.0/indexers/audiobookbay/results/torznab/", server.uri())
        );

        let stats = progress.get_stats();
        assert_eq!(stats.indexers_scanned, 4);
        assert_eq!(stats.indexers_matched, 3);
    }
}
