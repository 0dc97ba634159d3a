// file: src/models/category.rs
// description: category profiles used to decide which target an indexer belongs to
// reference: Newznab/Torznab standard category numbering

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TV_CATEGORIES: &[u32] = &[
    5000, 5010, 5020, 5030, 5040, 5045, 5050, 5060, 5070, 5080,
];

pub const MOVIE_CATEGORIES: &[u32] = &[
    2000, 2010, 2020, 2030, 2040, 2045, 2050, 2060, 2070, 2080,
];

/// Audio/Audiobook
pub const AUDIOBOOK_CATEGORIES: &[u32] = &[3030];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CategoryProfile {
    Tv,
    Movies,
    Audiobooks,
}

impl CategoryProfile {
    pub fn default_ids(self) -> &'static [u32] {
        match self {
            CategoryProfile::Tv => TV_CATEGORIES,
            CategoryProfile::Movies => MOVIE_CATEGORIES,
            CategoryProfile::Audiobooks => AUDIOBOOK_CATEGORIES,
        }
    }
}

impl fmt::Display for CategoryProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CategoryProfile::Tv => "TV",
            CategoryProfile::Movies => "Movie",
            CategoryProfile::Audiobooks => "Audiobook",
        };
        f.write_str(label)
    }
}

/// True when the indexer advertises at least one of the wanted categories.
/// An indexer without any advertised categories never matches.
pub fn supports_any(advertised: &[u32], wanted: &[u32]) -> bool {
    if advertised.is_empty() {
        return false;
    }
    wanted.iter().any(|id| advertised.contains(id))
}

pub fn join_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
