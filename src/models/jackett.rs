// file: src/models/jackett.rs
// description: Jackett indexer listing, per-indexer config and server config models
// reference: Jackett /api/v2.0 JSON responses

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A Torznab category advertised by an indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JackettIndexer {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(alias = "site_link", default)]
    pub link: String,
    #[serde(default)]
    pub configured: bool,
    #[serde(default, deserialize_with = "deserialize_caps")]
    pub caps: Vec<Category>,
}

impl JackettIndexer {
    pub fn category_ids(&self) -> Vec<u32> {
        self.caps.iter().map(|c| c.id).collect()
    }
}

/// Body of `/api/v2.0/indexers/{id}/config`. Only the capabilities matter here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexerConfig {
    #[serde(default, deserialize_with = "deserialize_caps")]
    pub caps: Vec<Category>,
}

impl IndexerConfig {
    pub fn category_ids(&self) -> Vec<u32> {
        self.caps.iter().map(|c| c.id).collect()
    }
}

/// Subset of `/api/v2.0/server/config`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Jackett answers with an array, but some versions and proxies hand back an
/// object keyed by indexer id. Both decode to the same list.
pub fn parse_indexer_list(body: Value) -> serde_json::Result<Vec<JackettIndexer>> {
    match body {
        Value::Object(map) => map
            .into_iter()
            .map(|(_, v)| serde_json::from_value(v))
            .collect(),
        other => serde_json::from_value(other),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCaps {
    Flat(Vec<RawCategory>),
    Nested { categories: Vec<RawCategory> },
    Unknown(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCategory {
    Entry {
        #[serde(alias = "ID", alias = "Id", default)]
        id: Option<RawCategoryId>,
        #[serde(alias = "Name", default)]
        name: Option<String>,
    },
    Unknown(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCategoryId {
    Number(u32),
    Text(String),
    Unknown(IgnoredAny),
}

impl RawCategoryId {
    fn value(&self) -> Option<u32> {
        match self {
            RawCategoryId::Number(n) => Some(*n),
            RawCategoryId::Text(s) => s.trim().parse().ok(),
            RawCategoryId::Unknown(_) => None,
        }
    }
}

impl RawCategory {
    fn into_category(self) -> Option<Category> {
        match self {
            RawCategory::Entry { id, name } => {
                let id = id.as_ref().and_then(RawCategoryId::value)?;
                Some(Category {
                    id,
                    name: name.unwrap_or_default(),
                })
            }
            RawCategory::Unknown(_) => None,
        }
    }
}

fn deserialize_caps<'de, D>(deserializer: D) -> Result<Vec<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawCaps>::deserialize(deserializer)?;
    let categories = match raw {
        Some(RawCaps::Flat(categories)) | Some(RawCaps::Nested { categories }) => categories,
        Some(RawCaps::Unknown(_)) | None => return Ok(Vec::new()),
    };

    // Entries without a u32 id (custom tracker ids, floats, nulls) are ignored
    Ok(categories
        .into_iter()
        .filter_map(RawCategory::into_category)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_flat_jackett_caps() {
        let indexer: JackettIndexer = serde_json::from_value(json!({
            "id": "1337x",
            "name": "1337x",
            "type": "public",
            "configured": true,
            "site_link": "https://1337x.to/",
            "caps": [
                { "ID": "2000", "Name": "Movies" },
                { "ID": "5000", "Name": "TV" },
                { "ID": "100002", "Name": "Movies/DVD" }
            ]
        }))
        .unwrap();

        assert_eq!(indexer.link, "https://1337x.to/");
        assert_eq!(indexer.kind, "public");
        assert_eq!(indexer.category_ids(), vec![2000, 5000, 100002]);
    }

    #[test]
    fn test_parse_nested_caps() {
        let indexer: JackettIndexer = serde_json::from_value(json!({
            "id": "abnormal",
            "name": "ABNormal",
            "type": "private",
            "link": "https://abn.lol/",
            "caps": { "categories": [{ "id": 2040, "name": "Movies/HD" }] }
        }))
        .unwrap();

        assert_eq!(indexer.kind, "private");
        assert!(!indexer.configured);
        assert_eq!(
            indexer.caps,
            vec![Category {
                id: 2040,
                name: "Movies/HD".to_string()
            }]
        );
    }

    #[test]
    fn test_missing_or_null_caps() {
        let missing: JackettIndexer =
            serde_json::from_value(json!({ "id": "a", "name": "A" })).unwrap();
        let null: JackettIndexer =
            serde_json::from_value(json!({ "id": "b", "name": "B", "caps": null })).unwrap();

        assert!(missing.caps.is_empty());
        assert!(null.caps.is_empty());
    }

    #[test]
    fn test_non_numeric_category_skipped() {
        let config: IndexerConfig = serde_json::from_value(json!({
            "caps": [{ "ID": "custom", "Name": "Other" }, { "ID": "3030", "Name": "Audio/Audiobook" }]
        }))
        .unwrap();

        assert_eq!(config.category_ids(), vec![3030]);
    }

    #[test]
    fn test_malformed_categories_do_not_drop_listing() {
        let listing = json!([
            { "id": "good", "name": "Good", "caps": [{ "ID": "5000", "Name": "TV" }] },
            { "id": "float", "name": "Float", "caps": [{ "ID": 5000.0 }] },
            {
                "id": "mixed",
                "name": "Mixed",
                "caps": [{ "ID": -1 }, { "ID": null }, { "Name": "no id" }, 7, { "ID": "2000" }]
            },
            { "id": "odd", "name": "Odd", "caps": "tv,movies" }
        ]);

        let indexers = parse_indexer_list(listing).unwrap();
        let caps: Vec<_> = indexers
            .iter()
            .map(|i| (i.id.as_str(), i.category_ids()))
            .collect();

        assert_eq!(
            caps,
            vec![
                ("good", vec![5000]),
                ("float", vec![]),
                ("mixed", vec![2000]),
                ("odd", vec![]),
            ]
        );
    }

    #[test]
    fn test_object_listing_keeps_jackett_order() {
        let body: Value = serde_json::from_str(
            r#"{
                "zooqle": { "id": "zooqle", "name": "Zooqle" },
                "1337x": { "id": "1337x", "name": "1337x" },
                "eztv": { "id": "eztv", "name": "EZTV" }
            }"#,
        )
        .unwrap();

        let ids: Vec<_> = parse_indexer_list(body)
            .unwrap()
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec!["zooqle", "1337x", "eztv"]);
    }

    #[test]
    fn test_parse_indexer_list_shapes() {
        let array = json!([{ "id": "a", "name": "A" }, { "id": "b", "name": "B" }]);
        let object = json!({ "a": { "id": "a", "name": "A" }, "b": { "id": "b", "name": "B" } });

        assert_eq!(parse_indexer_list(array).unwrap().len(), 2);

        let from_object = parse_indexer_list(object).unwrap();
        let ids: Vec<_> = from_object.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
