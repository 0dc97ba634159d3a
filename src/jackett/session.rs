// file: src/jackett/session.rs
// description: Jackett credential strategies and web UI session bootstrap
// reference: Jackett /UI/Dashboard login form and cookie session

use crate::config::JackettConfig;
use crate::error::{Result, SyncError};
use reqwest::{Client, RequestBuilder};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum JackettAuth {
    /// Sent as both `X-Api-Key` and the `apikey` query parameter.
    ApiKey(String),
    /// Cookies from the web UI, optionally after an admin password login.
    Session { admin_password: Option<String> },
}

impl JackettAuth {
    pub fn from_config(config: &JackettConfig) -> Self {
        match config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => JackettAuth::ApiKey(key.to_string()),
            _ => JackettAuth::Session {
                admin_password: config.admin_password.clone().filter(|p| !p.is_empty()),
            },
        }
    }

    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            JackettAuth::ApiKey(key) => request
                .header("X-Api-Key", key)
                .query(&[("apikey", key.as_str())]),
            // The client's cookie jar carries the session
            JackettAuth::Session { .. } => request,
        }
    }
}

/// Opens the dashboard so Jackett issues its session cookie, logging in
/// first when an admin password is set.
pub async fn establish(
    client: &Client,
    base_url: &str,
    admin_password: Option<&str>,
) -> Result<()> {
    info!("Connecting to Jackett web UI for a session");
    let dashboard = format!("{}/UI/Dashboard", base_url);

    if let Some(password) = admin_password {
        let response = client
            .post(&dashboard)
            .form(&[("password", password)])
            .send()
            .await
            .map_err(|e| SyncError::Session(e.to_string()))?;

        if response.url().path().ends_with("/UI/Login") {
            return Err(SyncError::Session(
                "admin password rejected, check JACKETT_ADMIN_PASSWORD".to_string(),
            ));
        }

        if !response.status().is_success() {
            return Err(SyncError::Session(format!(
                "login returned {}, check JACKETT_ADMIN_PASSWORD",
                response.status()
            )));
        }

        debug!("Logged in to Jackett as admin");
    }

    let response = client
        .get(&dashboard)
        .send()
        .await
        .map_err(|e| SyncError::Session(e.to_string()))?;

    if !response.status().is_success() {
        return Err(SyncError::Session(format!(
            "dashboard returned {}",
            response.status()
        )));
    }

    if response.url().path().ends_with("/UI/Login") {
        return Err(SyncError::Session(
            "Jackett requires an admin password (set JACKETT_ADMIN_PASSWORD) or an API key"
                .to_string(),
        ));
    }

    info!("Got Jackett session cookies");
    Ok(())
}
