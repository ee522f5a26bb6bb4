// src/github/mod.rs
// =============================================================================
// This module handles everything GitHub-side of the pipeline:
// - parse: classify a pasted URL into a UrlDescriptor
// - api: the REST transport (GET + status handling)
// - fetch: one strategy per resource kind, producing FetchedContent
//
// The types below are the plain values passed between those steps and on
// to the summarizer.
// =============================================================================

mod api;
mod fetch;
mod parse;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use api::{GithubClient, Lookup};
pub use fetch::get_content;
pub use parse::classify;

// The kinds of GitHub resource we know how to summarize
//
// Serialized with short names: "repo", "file", "issue", "pr".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Repo,
    File,
    Issue,
    #[serde(rename = "pr")]
    PullRequest,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Repo => "repo",
            ResourceKind::File => "file",
            ResourceKind::Issue => "issue",
            ResourceKind::PullRequest => "pr",
        }
    }

    /// Human label used in display names, e.g. "Pull Request #12 in o/r".
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Repo => "Repository",
            ResourceKind::File => "File",
            ResourceKind::Issue => "Issue",
            ResourceKind::PullRequest => "Pull Request",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "repo" => Ok(ResourceKind::Repo),
            "file" => Ok(ResourceKind::File),
            "issue" => Ok(ResourceKind::Issue),
            "pr" | "pull" | "pull_request" => Ok(ResourceKind::PullRequest),
            other => Err(format!("unknown resource kind: {other}")),
        }
    }
}

// A parsed GitHub URL
//
// `path` is only set for File, `id` only for Issue and PullRequest.
// classify() guarantees that; the fetcher still checks it because the
// fields are public and a descriptor can be built by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlDescriptor {
    pub owner: String,
    pub repo_name: String,
    pub kind: ResourceKind,
    pub path: Option<String>,
    pub id: Option<String>,
}

impl UrlDescriptor {
    pub fn repo(owner: &str, repo_name: &str) -> Self {
        Self {
            owner: owner.to_string(),
            repo_name: repo_name.to_string(),
            kind: ResourceKind::Repo,
            path: None,
            id: None,
        }
    }

    pub fn file(owner: &str, repo_name: &str, path: &str) -> Self {
        Self {
            path: Some(path.to_string()),
            kind: ResourceKind::File,
            ..Self::repo(owner, repo_name)
        }
    }

    pub fn numbered(owner: &str, repo_name: &str, kind: ResourceKind, id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            kind,
            ..Self::repo(owner, repo_name)
        }
    }

    /// "owner/repo"
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo_name)
    }
}

// What the fetcher hands to the summarizer: already-decoded text, a name
// to show the user, and the kind that picks the prompt template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchedContent {
    pub text: String,
    pub display_name: String,
    pub kind: ResourceKind,
}
