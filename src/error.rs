// src/error.rs
// =============================================================================
// Every way the fetch + summarize pipeline can fail.
//
// The library returns this typed enum (built with `thiserror`) instead of
// anyhow::Error so callers can tell failures apart. The one that matters most
// is InvalidCredential: the front end reacts to it by throwing away the
// stored API key.
// =============================================================================

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "Invalid GitHub URL format. Please use a valid URL for a repository, file, issue, or pull request."
    )]
    InvalidUrl,

    // Only reachable if a descriptor is built by hand with a missing field
    #[error("{0} not found in URL")]
    MissingPathOrId(&'static str),

    #[error("Could not fetch the {0}. It might be private or the URL is incorrect.")]
    ResourceNotFound(String),

    #[error("Could not retrieve file content: unsupported encoding '{0}'")]
    UnsupportedEncoding(String),

    #[error("GitHub API Error: {status}. {message}")]
    GitHubApi { status: StatusCode, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Could not decode GitHub response: {0}")]
    Decode(String),

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: url::ParseError },

    #[error("API key is missing.")]
    MissingCredential,

    #[error("The API returned an empty summary. The content might be too short or unsupported.")]
    EmptySummary,

    #[error("Your Gemini API key is not valid. Please check it and try again.")]
    InvalidCredential,

    #[error("Failed to generate summary due to an API error.")]
    SummarizationFailed,
}

impl Error {
    /// True when the LLM service rejected the API key (or none was given),
    /// i.e. the user has to supply a different one.
    pub fn is_credential_problem(&self) -> bool {
        matches!(self, Error::InvalidCredential | Error::MissingCredential)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_problems() {
        assert!(Error::InvalidCredential.is_credential_problem());
        assert!(Error::MissingCredential.is_credential_problem());
        assert!(!Error::SummarizationFailed.is_credential_problem());
        assert!(!Error::InvalidUrl.is_credential_problem());
    }

    #[test]
    fn test_github_api_message() {
        let err = Error::GitHubApi {
            status: StatusCode::FORBIDDEN,
            message: "API rate limit exceeded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "GitHub API Error: 403 Forbidden. API rate limit exceeded"
        );
    }
}
