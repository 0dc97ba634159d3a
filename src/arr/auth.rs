// file: src/arr/auth.rs
// description: ordered authentication methods tried when creating an indexer
// reference: *arr API key header, apikey query parameter and bearer token

use reqwest::RequestBuilder;
use reqwest::StatusCode;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStrategy {
    /// `X-Api-Key: <key>`
    Header,
    /// `?apikey=<key>`
    QueryParam,
    /// `Authorization: Bearer <key>`
    Bearer,
}

impl AuthStrategy {
    pub const FALLBACK_ORDER: [AuthStrategy; 3] = [
        AuthStrategy::Header,
        AuthStrategy::QueryParam,
        AuthStrategy::Bearer,
    ];

    pub fn apply(self, request: RequestBuilder, api_key: &str) -> RequestBuilder {
        match self {
            AuthStrategy::Header => request.header("X-Api-Key", api_key),
            AuthStrategy::QueryParam => request.query(&[("apikey", api_key)]),
            AuthStrategy::Bearer => request.bearer_auth(api_key),
        }
    }

    /// Only an explicit authentication rejection moves on to the next method.
    pub fn should_fall_back(status: StatusCode) -> bool {
        matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
    }
}

impl fmt::Display for AuthStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AuthStrategy::Header => "header",
            AuthStrategy::QueryParam => "query",
            AuthStrategy::Bearer => "bearer",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_statuses() {
        assert!(AuthStrategy::should_fall_back(StatusCode::UNAUTHORIZED));
        assert!(AuthStrategy::should_fall_back(StatusCode::FORBIDDEN));
        assert!(!AuthStrategy::should_fall_back(StatusCode::BAD_REQUEST));
        assert!(!AuthStrategy::should_fall_back(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn test_apply_query_param() {
        let client = reqwest::Client::new();
        let request = AuthStrategy::QueryParam
            .apply(client.post("http://localhost/api/v3/indexer"), "abc")
            .build()
            .unwrap();

        assert_eq!(request.url().query(), Some("apikey=abc"));
        assert!(request.headers().get("X-Api-Key").is_none());
    }

    #[test]
    fn test_apply_bearer() {
        let client = reqwest::Client::new();
        let request = AuthStrategy::Bearer
            .apply(client.post("http://localhost/api/v3/indexer"), "abc")
            .build()
            .unwrap();

        assert_eq!(
            request.headers().get("authorization").unwrap(),
            "Bearer abc"
        );
    }
}
