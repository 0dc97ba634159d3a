// file: src/jackett/client.rs
// description: Jackett API client for indexer discovery and per-indexer capabilities
// reference: Jackett /api/v2.0 endpoints used by its web UI

use crate::config::JackettConfig;
use crate::error::{Result, SyncError};
use crate::jackett::session::{self, JackettAuth};
use crate::models::{IndexerConfig, JackettIndexer, ServerConfig, parse_indexer_list};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct JackettClient {
    client: Client,
    base_url: String,
    auth: JackettAuth,
    config: JackettConfig,
}

impl JackettClient {
    /// Builds the client and, when no API key is configured, opens a web UI
    /// session whose cookies authorize the following API calls.
    pub async fn connect(config: &JackettConfig) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base_url = config.url.trim_end_matches('/').to_string();
        let auth = JackettAuth::from_config(config);

        if let JackettAuth::Session { admin_password } = &auth {
            session::establish(&client, &base_url, admin_password.as_deref()).await?;
        }

        Ok(Self {
            client,
            base_url,
            auth,
            config: config.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn torznab_url(&self, indexer_id: &str) -> String {
        torznab_url(&self.base_url, indexer_id)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let request = self.client.get(format!("{}{}", self.base_url, path));
        self.auth.apply(request)
    }

    pub async fn list_indexers(&self, configured_only: bool) -> Result<Vec<JackettIndexer>> {
        let mut request = self.get("/api/v2.0/indexers");
        if configured_only {
            request = request.query(&[("configured", "true")]);
        }

        debug!("Fetching indexers from {}", self.base_url);
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::api("Jackett", status, body));
        }

        let body: serde_json::Value = response.json().await?;
        let indexers = parse_indexer_list(body)?;
        info!("Jackett returned {} indexers", indexers.len());
        Ok(indexers)
    }

    /// Like `list_indexers`, but an empty listing is `NoIndexers`.
    pub async fn require_indexers(&self, configured_only: bool) -> Result<Vec<JackettIndexer>> {
        let indexers = self.list_indexers(configured_only).await?;
        if indexers.is_empty() {
            return Err(SyncError::NoIndexers);
        }
        Ok(indexers)
    }

    /// Configured indexers minus the excluded types and ids.
    pub async fn discover_indexers(&self) -> Result<Vec<JackettIndexer>> {
        let indexers = self.require_indexers(true).await?;
        let total = indexers.len();

        let kept: Vec<_> = indexers
            .into_iter()
            .filter(|indexer| !is_excluded(indexer, &self.config))
            .collect();

        if kept.len() < total {
            debug!("Excluded {} indexers by type or id", total - kept.len());
        }

        Ok(kept)
    }

    /// Capabilities of a single indexer. Failures yield an empty config.
    pub async fn indexer_config(&self, indexer_id: &str) -> IndexerConfig {
        let path = format!("/api/v2.0/indexers/{}/config", indexer_id);

        let response = match self.get(&path).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                debug!("Config for {} returned {}", indexer_id, response.status());
                return IndexerConfig::default();
            }
            Err(e) => {
                debug!("Config for {} failed: {}", indexer_id, e);
                return IndexerConfig::default();
            }
        };

        response.json().await.unwrap_or_else(|e| {
            debug!("Config for {} not understood: {}", indexer_id, e);
            IndexerConfig::default()
        })
    }

    /// API key to publish alongside Torznab feeds: the server's own key when
    /// it can be read, else the configured key, else the placeholder.
    pub async fn discover_api_key(&self, placeholder: &str) -> String {
        match self.server_config().await {
            Ok(ServerConfig {
                api_key: Some(key),
            }) if !key.is_empty() => {
                info!("Using API key reported by Jackett");
                return key;
            }
            Ok(_) => warn!("Jackett server config did not include an API key"),
            Err(e) => warn!("Could not read Jackett server config: {}", e),
        }

        self.config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| placeholder.to_string())
    }

    pub async fn server_config(&self) -> Result<ServerConfig> {
        let response = self.get("/api/v2.0/server/config").send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::api("Jackett", status, body));
        }

        Ok(response.json().await?)
    }

    pub async fn ping(&self) -> Result<()> {
        self.server_config().await.map(|_| ())
    }
}

pub fn torznab_url(base_url: &str, indexer_id: &str) -> String {
    format!(
        "{}/api/v2.0/indexers/{}/results/torznab/",
        base_url.trim_end_matches('/'),
        indexer_id
    )
}

pub fn is_excluded(indexer: &JackettIndexer, config: &JackettConfig) -> bool {
    config.exclude_types.iter().any(|t| t == &indexer.kind)
        || config
            .exclude_ids
            .iter()
            .any(|fragment| indexer.id.contains(fragment.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn jackett_config(server: &MockServer, api_key: Option<&str>) -> JackettConfig {
        let mut config = Config::default_config().jackett;
        config.url = format!("{}/", server.uri());
        config.api_key = api_key.map(str::to_string);
        config
    }

    fn indexer(id: &str, kind: &str) -> JackettIndexer {
        serde_json::from_value(json!({ "id": id, "name": id, "type": kind })).unwrap()
    }

    #[test]
    fn test_torznab_url() {
        assert_eq!(
            torznab_url("http://jackett:9117/", "1337x"),
            "http://jackett:9117/api/v2.0/indexers/1337x/results/torznab/"
        );
    }

    #[test]
    fn test_exclusion_rules() {
        let config = Config::default_config().jackett;

        assert!(!is_excluded(&indexer("1337x", "public"), &config));
        assert!(is_excluded(&indexer("torrentleech", "private"), &config));
        assert!(is_excluded(&indexer("animebytes", "semi-private"), &config));
        assert!(is_excluded(&indexer("zetorrents-fr", "public"), &config));
    }

    #[tokio::test]
    async fn test_discover_indexers_with_api_key() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2.0/indexers"))
            .and(query_param("configured", "true"))
            .and(header("X-Api-Key", "jackett-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "1337x", "name": "1337x", "type": "public", "caps": [{ "ID": "5000", "Name": "TV" }] },
                { "id": "iptorrents", "name": "IPTorrents", "type": "private" },
                { "id": "zetorrents", "name": "ZeTorrents", "type": "public" },
                { "id": "eztv", "name": "EZTV", "type": "public" }
            ])))
            .mount(&server)
            .await;

        let client = JackettClient::connect(&jackett_config(&server, Some("jackett-key")))
            .await
            .unwrap();
        let indexers = client.discover_indexers().await.unwrap();

        let ids: Vec<_> = indexers.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1337x", "eztv"]);
        assert_eq!(indexers[0].category_ids(), vec![5000]);
    }

    #[tokio::test]
    async fn test_empty_listing_is_no_indexers() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2.0/indexers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = JackettClient::connect(&jackett_config(&server, Some("jackett-key")))
            .await
            .unwrap();

        assert!(client.list_indexers(false).await.unwrap().is_empty());
        assert!(matches!(
            client.require_indexers(false).await,
            Err(SyncError::NoIndexers)
        ));
        assert!(matches!(
            client.discover_indexers().await,
            Err(SyncError::NoIndexers)
        ));
    }

    #[tokio::test]
    async fn test_list_indexers_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2.0/indexers"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let client = JackettClient::connect(&jackett_config(&server, Some("bad")))
            .await
            .unwrap();
        let err = client.list_indexers(false).await.unwrap_err();

        assert!(matches!(err, SyncError::Api { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_indexer_config_failure_is_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2.0/indexers/good/config"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "caps": [{ "ID": "3030", "Name": "Audio/Audiobook" }]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v2.0/indexers/broken/config"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = JackettClient::connect(&jackett_config(&server, Some("k")))
            .await
            .unwrap();

        assert_eq!(client.indexer_config("good").await.category_ids(), vec![3030]);
        assert!(client.indexer_config("broken").await.caps.is_empty());
    }

    #[tokio::test]
    async fn test_discover_api_key_fallbacks() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2.0/server/config"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let with_key = JackettClient::connect(&jackett_config(&server, Some("configured")))
            .await
            .unwrap();
        assert_eq!(with_key.discover_api_key("PLACEHOLDER").await, "configured");

        let mut config = jackett_config(&server, None);
        config.admin_password = None;
        Mock::given(method("GET"))
            .and(path("/UI/Dashboard"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let without_key = JackettClient::connect(&config).await.unwrap();
        assert_eq!(without_key.discover_api_key("PLACEHOLDER").await, "PLACEHOLDER");
    }

    #[tokio::test]
    async fn test_discover_api_key_from_server() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2.0/server/config"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "api_key": "from-server",
                "port": 9117
            })))
            .mount(&server)
            .await;

        let client = JackettClient::connect(&jackett_config(&server, Some("configured")))
            .await
            .unwrap();
        assert_eq!(client.discover_api_key("PLACEHOLDER").await, "from-server");
    }
}
