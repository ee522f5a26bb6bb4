// src/config.rs
// =============================================================================
// Endpoints and model name used by the two API clients.
//
// Defaults point at the real services. The CLI can override every field,
// and tests point them at local mock servers.
// =============================================================================

use url::Url;

use crate::error::{Error, Result};

pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";
pub const DEFAULT_GEMINI_API: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub github_api_base: String,
    pub gemini_api_base: String,
    pub model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_api_base: DEFAULT_GITHUB_API.to_string(),
            gemini_api_base: DEFAULT_GEMINI_API.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

// Checks that a base URL parses and strips any trailing slash so we can
// always append "/path" to it.
pub(crate) fn normalize_base(base: &str) -> Result<String> {
    Url::parse(base).map_err(|reason| Error::InvalidBaseUrl {
        url: base.to_string(),
        reason,
    })?;
    Ok(base.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.github_api_base, "https://api.github.com");
        assert_eq!(config.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_normalize_base_strips_slash() {
        let base = normalize_base("http://127.0.0.1:8080/").unwrap();
        assert_eq!(base, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_normalize_base_rejects_garbage() {
        let result = normalize_base("not a base url");
        assert!(matches!(result, Err(Error::InvalidBaseUrl { .. })));
    }
}
