// file: src/arr/mod.rs
// description: Sonarr/Radarr/Listenarr target module exports
// reference: internal module structure

pub mod auth;
pub mod client;
pub mod target;

pub use auth::AuthStrategy;
pub use client::ArrClient;
pub use target::TargetKind;
