// file: src/models/arr.rs
// description: request and response models for the Sonarr/Radarr/Listenarr indexer API
// reference: *arr v3 indexer resource (Torznab implementation)

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

impl Field {
    pub fn new(name: &str, value: impl Into<Value>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexerResource {
    pub name: String,
    pub implementation: String,
    pub config_contract: String,
    pub enable_rss: bool,
    pub enable_automatic_search: bool,
    pub enable_interactive_search: bool,
    pub priority: i32,
    pub fields: Vec<Field>,
}

impl IndexerResource {
    pub fn torznab(
        name: &str,
        base_url: &str,
        api_key: Option<&str>,
        categories: &[u32],
        priority: i32,
    ) -> Self {
        Self {
            name: name.to_string(),
            implementation: "Torznab".to_string(),
            config_contract: "TorznabSettings".to_string(),
            enable_rss: true,
            enable_automatic_search: true,
            enable_interactive_search: true,
            priority,
            fields: vec![
                Field::new("baseUrl", base_url),
                Field::new("apiPath", "/api"),
                Field::new("apiKey", api_key.unwrap_or_default()),
                Field::new("categories", categories.to_vec()),
                Field::new("automaticSearch", true),
                Field::new("interactiveSearch", true),
                Field::new("priority", priority),
                Field::new("downloadClientId", 0),
            ],
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }
}

/// An indexer already registered in a target. Only the name is used for dedup.
#[derive(Debug, Clone, Deserialize)]
pub struct ExistingIndexer {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}
