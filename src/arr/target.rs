// file: src/arr/target.rs
// description: downstream applications that receive indexers
// reference: Sonarr v3, Radarr v3 and Listenarr v1 APIs

use crate::models::CategoryProfile;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Sonarr,
    Radarr,
    Listenarr,
}

impl TargetKind {
    /// Processing order for every indexer.
    pub const ALL: [TargetKind; 3] = [TargetKind::Sonarr, TargetKind::Radarr, TargetKind::Listenarr];

    pub fn profile(self) -> CategoryProfile {
        match self {
            TargetKind::Sonarr => CategoryProfile::Tv,
            TargetKind::Radarr => CategoryProfile::Movies,
            TargetKind::Listenarr => CategoryProfile::Audiobooks,
        }
    }

    pub fn api_key_variable(self) -> &'static str {
        match self {
            TargetKind::Sonarr => "SONARR_API_KEY",
            TargetKind::Radarr => "RADARR_API_KEY",
            TargetKind::Listenarr => "LISTENARR_API_KEY",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetKind::Sonarr => "Sonarr",
            TargetKind::Radarr => "Radarr",
            TargetKind::Listenarr => "Listenarr",
        };
        f.write_str(name)
    }
}
