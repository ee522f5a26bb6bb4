// src/github/api.rs
// =============================================================================
// Thin transport over the GitHub REST API.
//
// Every call is a GET under {base}/repos/ with the v3 JSON Accept header.
// The answer is a tri-state:
//   Ok(Lookup::Found(value)) - 2xx with a JSON body
//   Ok(Lookup::Absent)       - 404 or 204, the resource simply isn't there
//   Err(Error::GitHubApi)    - any other status, with GitHub's message
//
// Keeping "absent" separate from "error" lets each fetch strategy decide
// whether a missing resource is fine (no README) or fatal (no such issue).
//
// Rust concepts:
// - Generics: get_json<T> decodes into whatever type the caller asks for
// - DeserializeOwned: T must own its data, since the response body is
//   dropped once decoding is done
// =============================================================================

use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::{normalize_base, DEFAULT_GITHUB_API};
use crate::error::{Error, Result};

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

// GitHub rejects requests that carry no User-Agent
const USER_AGENT: &str = concat!("gh-digest/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    Absent,
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Absent => None,
        }
    }
}

// Error bodies look like {"message": "Not Found", "documentation_url": "..."}
#[derive(Deserialize)]
struct ApiMessage {
    message: String,
}

#[derive(Debug, Clone)]
pub struct GithubClient {
    client: Client,
    base: String,
}

impl GithubClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_GITHUB_API)
    }

    /// Builds a client against another API root (GitHub Enterprise, or a
    /// mock server in tests).
    pub fn with_base_url(base: &str) -> Result<Self> {
        // One client per GithubClient; reqwest pools connections inside it
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base: normalize_base(base)?,
        })
    }

    // GETs "{base}/repos/{endpoint}" and decodes the JSON body
    //
    // `endpoint` is everything after /repos/, query string included,
    // e.g. "rust-lang/rust/issues?state=open".
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Lookup<T>> {
        // Base has no trailing slash (normalize_base), endpoint has no leading one
        let url = format!("{}/repos/{}", self.base, endpoint);
        tracing::debug!(%url, "GitHub request");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, GITHUB_ACCEPT)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(%url, %status, "GitHub response");

        // Missing README, no comments, unknown issue: the caller decides
        if status == StatusCode::NOT_FOUND || status == StatusCode::NO_CONTENT {
            tracing::info!(%url, %status, "GitHub resource absent");
            return Ok(Lookup::Absent);
        }

        // Rate limits, server errors, ... carry a JSON "message" we pass on.
        // If the body isn't that shape, fall back to a generic message.
        if !status.is_success() {
            let message = response
                .json::<ApiMessage>()
                .await
                .map(|body| body.message)
                .unwrap_or_else(|_| "Failed to fetch from GitHub API.".to_string());
            return Err(Error::GitHubApi { status, message });
        }

        // Read the whole body, then decode it into the requested type
        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map(Lookup::Found)
            .map_err(|e| Error::Decode(e.to_string()))
    }
}
