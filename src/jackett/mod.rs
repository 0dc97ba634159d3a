// file: src/jackett/mod.rs
// description: Jackett client module exports
// reference: internal module structure

pub mod client;
pub mod session;

pub use client::{JackettClient, is_excluded, torznab_url};
pub use session::JackettAuth;
