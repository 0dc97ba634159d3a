// file: src/utils/validation.rs
// description: input validation for service URLs, API keys and export paths
// reference: input validation patterns

use crate::error::{Result, SyncError};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_url(url: &str) -> Result<()> {
        let url = url.trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(SyncError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }

        if reqwest::Url::parse(url).is_err() {
            return Err(SyncError::Validation(format!("Unparsable URL: {}", url)));
        }

        Ok(())
    }

    pub fn validate_api_key(service: &str, key: &str) -> Result<()> {
        if key.trim().is_empty() {
            return Err(SyncError::Validation(format!(
                "{} API key is empty",
                service
            )));
        }

        if key.chars().any(char::is_whitespace) {
            return Err(SyncError::Validation(format!(
                "{} API key contains whitespace",
                service
            )));
        }

        Ok(())
    }

    pub fn validate_output_path(path: &Path) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(SyncError::Validation("Output path is empty".to_string()));
        }

        if path.is_dir() {
            return Err(SyncError::Validation(format!(
                "Output path is a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    /// Shortens response bodies before they reach the terminal.
    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            let head: String = text.chars().take(max_chars).collect();
            format!("{}...", head)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_url() {
        assert!(Validator::validate_url("https://example.com").is_ok());
        assert!(Validator::validate_url("http://192.168.31.75:9117").is_ok());
        assert!(Validator::validate_url("example.com").is_err());
        assert!(Validator::validate_url("ftp://example.com").is_err());
        assert!(Validator::validate_url("http://").is_err());
    }

    #[test]
    fn test_validate_api_key() {
        assert!(Validator::validate_api_key("Sonarr", "0123456789abcdef").is_ok());
        assert!(Validator::validate_api_key("Sonarr", "   ").is_err());
        assert!(Validator::validate_api_key("Sonarr", "abc def").is_err());
    }

    #[test]
    fn test_validate_output_path() {
        let temp = TempDir::new().unwrap();
        assert!(Validator::validate_output_path(&temp.path().join("out.tsv")).is_ok());
        assert!(Validator::validate_output_path(temp.path()).is_err());
        assert!(Validator::validate_output_path(Path::new("")).is_err());
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(Validator::truncate_text("short", 10), "short");
        assert_eq!(
            Validator::truncate_text("this is a very long text", 10),
            "this is a ..."
        );
        assert_eq!(Validator::truncate_text("ééééé", 2), "éé...");
    }
}
