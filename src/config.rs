// file: src/config.rs
// description: application configuration management with toml and environment support
// reference: https://docs.rs/config

use crate::arr::TargetKind;
use crate::error::{Result, SyncError};
use crate::models::CategoryProfile;
use crate::models::category::{AUDIOBOOK_CATEGORIES, MOVIE_CATEGORIES, TV_CATEGORIES};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const ENV_PREFIX: &str = "JACKETT_SYNC";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub jackett: JackettConfig,
    pub sonarr: TargetConfig,
    pub radarr: TargetConfig,
    pub listenarr: TargetConfig,
    pub categories: CategoryConfig,
    pub export: ExportConfig,
    #[serde(default)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JackettConfig {
    pub url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub admin_password: Option<String>,
    pub exclude_types: Vec<String>,
    pub exclude_ids: Vec<String>,
    pub timeout_secs: u64,
    pub concurrency: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetConfig {
    pub enabled: bool,
    pub url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub api_path: String,
    pub priority: i32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CategoryConfig {
    pub tv: Vec<u32>,
    pub movies: Vec<u32>,
    pub audiobooks: Vec<u32>,
}

impl CategoryConfig {
    pub fn ids(&self, profile: CategoryProfile) -> &[u32] {
        match profile {
            CategoryProfile::Tv => &self.tv,
            CategoryProfile::Movies => &self.movies,
            CategoryProfile::Audiobooks => &self.audiobooks,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    pub placeholder_api_key: String,
}

/// Flat variables understood for compatibility with existing `.env` files.
const LEGACY_VARIABLES: &[(&str, &str)] = &[
    ("JACKETT_URL", "jackett.url"),
    ("JACKETT_API_KEY", "jackett.api_key"),
    ("JACKETT_ADMIN_PASSWORD", "jackett.admin_password"),
    ("SONARR_URL", "sonarr.url"),
    ("SONARR_API_KEY", "sonarr.api_key"),
    ("RADARR_URL", "radarr.url"),
    ("RADARR_API_KEY", "radarr.api_key"),
    ("LISTENARR_URL", "listenarr.url"),
    ("LISTENARR_API_KEY", "listenarr.api_key"),
];

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();
        let env: config::Map<String, String> = std::env::vars().collect();
        Self::load_from(path, env)
    }

    /// Builds the layered configuration from an explicit environment map.
    pub fn load_from(path: Option<&Path>, env: config::Map<String, String>) -> Result<Self> {
        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| SyncError::Config(e.to_string()))?;

        let mut builder = config::Config::builder().add_source(defaults);

        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        builder = builder.add_source(config::File::from(file).required(path.is_some()));

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(Some(env.clone())),
        );

        for (variable, key) in LEGACY_VARIABLES {
            builder = builder
                .set_override_option(*key, non_empty(&env, variable))
                .map_err(|e| SyncError::Config(e.to_string()))?;
        }

        if non_empty(&env, "LISTENARR_URL").is_some() {
            // Pointing at a Listenarr instance opts it into syncing
            builder = builder
                .set_override("listenarr.enabled", true)
                .map_err(|e| SyncError::Config(e.to_string()))?;
        }

        builder = builder
            .set_override_option("dry_run", env.get("DRY_RUN").map(|v| v == "true"))
            .map_err(|e| SyncError::Config(e.to_string()))?;

        let settings = builder
            .build()
            .map_err(|e| SyncError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| SyncError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            jackett: JackettConfig {
                url: "http://localhost:9117".to_string(),
                api_key: None,
                admin_password: None,
                exclude_types: vec!["private".to_string(), "semi-private".to_string()],
                exclude_ids: vec!["zetorrents".to_string()],
                timeout_secs: 30,
                concurrency: 4,
            },
            sonarr: TargetConfig {
                enabled: true,
                url: "http://localhost:8989".to_string(),
                api_key: None,
                api_path: "/api/v3".to_string(),
                priority: 1,
            },
            radarr: TargetConfig {
                enabled: true,
                url: "http://localhost:7878".to_string(),
                api_key: None,
                api_path: "/api/v3".to_string(),
                priority: 1,
            },
            listenarr: TargetConfig {
                enabled: false,
                url: "http://localhost:5000".to_string(),
                api_key: None,
                api_path: "/api/v1".to_string(),
                priority: 1,
            },
            categories: CategoryConfig {
                tv: TV_CATEGORIES.to_vec(),
                movies: MOVIE_CATEGORIES.to_vec(),
                audiobooks: AUDIOBOOK_CATEGORIES.to_vec(),
            },
            export: ExportConfig {
                placeholder_api_key: "YOUR_JACKETT_API_KEY".to_string(),
            },
            dry_run: false,
        }
    }

    pub fn target(&self, kind: TargetKind) -> &TargetConfig {
        match kind {
            TargetKind::Sonarr => &self.sonarr,
            TargetKind::Radarr => &self.radarr,
            TargetKind::Listenarr => &self.listenarr,
        }
    }

    pub fn enabled_targets(&self) -> Vec<TargetKind> {
        TargetKind::ALL
            .into_iter()
            .filter(|kind| self.target(*kind).enabled)
            .collect()
    }

    /// Returns the target's API key, or an error naming the variable to set.
    pub fn require_api_key(&self, kind: TargetKind) -> Result<&str> {
        self.target(kind)
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| SyncError::MissingApiKey {
                service: kind.to_string(),
                variable: kind.api_key_variable().to_string(),
            })
    }

    /// Targets a sync run should touch. An explicit request wins over the
    /// `enabled` flags; the result is always in processing order.
    pub fn resolve_targets(&self, requested: &[TargetKind]) -> Vec<TargetKind> {
        if requested.is_empty() {
            return self.enabled_targets();
        }

        TargetKind::ALL
            .into_iter()
            .filter(|kind| requested.contains(kind))
            .collect()
    }

    /// Variables to set for every target in `targets` that has no API key.
    pub fn missing_api_keys(&self, targets: &[TargetKind]) -> Vec<&'static str> {
        targets
            .iter()
            .filter(|kind| self.require_api_key(**kind).is_err())
            .map(|kind| kind.api_key_variable())
            .collect()
    }

    fn validate(&self) -> Result<()> {
        Validator::validate_url(&self.jackett.url)?;
        for kind in TargetKind::ALL {
            Validator::validate_url(&self.target(kind).url)?;
        }

        if self.jackett.concurrency == 0 {
            return Err(SyncError::Config(
                "jackett.concurrency must be greater than 0".to_string(),
            ));
        }

        if self.jackett.timeout_secs == 0 {
            return Err(SyncError::Config(
                "jackett.timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn non_empty(env: &config::Map<String, String>, variable: &str) -> Option<String> {
    env.get(variable)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
