// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use crate::utils::Validator;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyncError>;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing API key for {service}: set {variable}")]
    MissingApiKey { service: String, variable: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} API error ({status}): {body}")]
    Api {
        service: String,
        status: u16,
        body: String,
    },

    #[error("{service} rejected every authentication method ({attempts})")]
    AuthRejected { service: String, attempts: String },

    #[error("Jackett session could not be established: {0}")]
    Session(String),

    #[error("No indexers found in Jackett")]
    NoIndexers,

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SyncError {
    pub fn api(service: impl Into<String>, status: reqwest::StatusCode, body: String) -> Self {
        Self::Api {
            service: service.into(),
            status: status.as_u16(),
            body: Validator::truncate_text(body.trim(), 300),
        }
    }
}
