// src/github/fetch.rs
// =============================================================================
// This module turns a UrlDescriptor into FetchedContent.
//
// Strategy per kind:
// - Repo: README + 10 most recently updated open issues, fetched together
// - File: the contents endpoint, base64-decoded
// - Issue / PullRequest: the item + its first 15 comments, fetched together
//
// The paired requests run concurrently with futures::try_join!, which waits
// for both but bails out as soon as either one returns a hard error. A 404
// is not a hard error (see api.rs); each strategy decides what it means.
//
// Rust concepts:
// - async functions: For network I/O
// - serde Deserialize: Only the fields we use are declared, the rest of
//   GitHub's (large) JSON objects is ignored
// =============================================================================

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;

use super::api::{GithubClient, Lookup};
use super::{classify, FetchedContent, ResourceKind, UrlDescriptor};
use crate::error::{Error, Result};

const NO_README: &str = "No README file found.";
const NO_ISSUES: &str = "No recent open issues found.";
const NO_COMMENTS: &str = "No comments on this thread.";
const NO_DESCRIPTION: &str = "No description provided.";

// GET /repos/{owner}/{repo}/readme and /contents/{path}
#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    content: String,
    #[serde(default)]
    encoding: String,
    path: String,
}

// /contents/{path} answers with a list when the path is a directory
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentsLookup {
    File(ContentResponse),
    Directory(Vec<serde_json::Value>),
}

#[derive(Debug, Deserialize)]
struct User {
    login: String,
}

#[derive(Debug, Deserialize)]
struct IssueSummary {
    number: u64,
    title: String,
}

// Issues and pulls share the fields we care about
#[derive(Debug, Deserialize)]
struct Discussion {
    title: String,
    user: Option<User>,
    state: String,
    body: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Comment {
    user: Option<User>,
    body: Option<String>,
}

// Fetches and flattens the content behind a GitHub URL
//
// This is the main entry point of the GitHub half. It uses the public
// api.github.com endpoint; use GithubClient::get_content to target
// another host.
//
// Example:
//   get_content("https://github.com/rust-lang/rust").await?
//   -> FetchedContent { display_name: "rust-lang/rust", kind: Repo, .. }
pub async fn get_content(url: &str) -> Result<FetchedContent> {
    GithubClient::new()?.get_content(url).await
}

impl GithubClient {
    pub async fn get_content(&self, url: &str) -> Result<FetchedContent> {
        let descriptor = classify(url).ok_or(Error::InvalidUrl)?;
        tracing::info!(
            repo = %descriptor.full_name(),
            kind = %descriptor.kind,
            "fetching GitHub content"
        );
        self.fetch(&descriptor).await
    }

    // Dispatches a descriptor to its fetch strategy
    pub async fn fetch(&self, descriptor: &UrlDescriptor) -> Result<FetchedContent> {
        let UrlDescriptor {
            owner, repo_name, ..
        } = descriptor;

        match descriptor.kind {
            ResourceKind::Repo => self.fetch_repo(owner, repo_name).await,
            ResourceKind::File => {
                let path = descriptor
                    .path
                    .as_deref()
                    .ok_or(Error::MissingPathOrId("File path"))?;
                self.fetch_file(owner, repo_name, path).await
            }
            kind @ (ResourceKind::Issue | ResourceKind::PullRequest) => {
                let id = descriptor
                    .id
                    .as_deref()
                    .ok_or(Error::MissingPathOrId(match kind {
                        ResourceKind::Issue => "Issue ID",
                        _ => "Pull request ID",
                    }))?;
                self.fetch_discussion(owner, repo_name, id, kind).await
            }
        }
    }

    async fn fetch_repo(&self, owner: &str, repo: &str) -> Result<FetchedContent> {
        let readme_endpoint = format!("{owner}/{repo}/readme");
        let issues_endpoint = format!("{owner}/{repo}/issues?state=open&per_page=10&sort=updated");

        let (readme, issues) = futures::try_join!(
            self.get_json::<ContentResponse>(&readme_endpoint),
            self.get_json::<Vec<IssueSummary>>(&issues_endpoint),
        )?;

        let readme_text = match readme {
            Lookup::Found(readme) => decode_base64(&readme.content)?,
            Lookup::Absent => NO_README.to_string(),
        };

        let issues = issues.found().unwrap_or_default();
        let issues_text = if issues.is_empty() {
            NO_ISSUES.to_string()
        } else {
            issues
                .iter()
                .map(|issue| format!("- Issue #{}: {}", issue.number, issue.title))
                .collect::<Vec<_>>()
                .join("\n")
        };

        let text = format!(
            "--- REPO README ---\n{readme_text}\n--- END REPO README ---\n\n\
             --- RECENTLY UPDATED OPEN ISSUES ---\n{issues_text}\n--- END RECENTLY UPDATED OPEN ISSUES ---\n"
        );

        Ok(FetchedContent {
            text,
            display_name: format!("{owner}/{repo}"),
            kind: ResourceKind::Repo,
        })
    }

    async fn fetch_file(&self, owner: &str, repo: &str, path: &str) -> Result<FetchedContent> {
        let file = match self
            .get_json::<ContentsLookup>(&format!("{owner}/{repo}/contents/{path}"))
            .await?
        {
            Lookup::Found(ContentsLookup::File(file)) => file,
            Lookup::Found(ContentsLookup::Directory(entries)) => {
                return Err(Error::ResourceNotFound(format!(
                    "file '{path}' (the path is a directory with {} entries)",
                    entries.len()
                )))
            }
            Lookup::Absent => return Err(Error::ResourceNotFound(format!("file '{path}'"))),
        };

        if file.encoding != "base64" {
            return Err(Error::UnsupportedEncoding(file.encoding));
        }

        Ok(FetchedContent {
            text: decode_base64(&file.content)?,
            // GitHub's canonical path, which may differ in case from the URL
            display_name: file.path,
            kind: ResourceKind::File,
        })
    }

    async fn fetch_discussion(
        &self,
        owner: &str,
        repo: &str,
        id: &str,
        kind: ResourceKind,
    ) -> Result<FetchedContent> {
        let (item_segment, header) = match kind {
            ResourceKind::PullRequest => ("pulls", "PR"),
            _ => ("issues", "ISSUE"),
        };
        let item_endpoint = format!("{owner}/{repo}/{item_segment}/{id}");
        // Pull request conversation comments live under /issues too
        let comments_endpoint = format!("{owner}/{repo}/issues/{id}/comments?per_page=15&sort=created");

        let (item, comments) = futures::try_join!(
            self.get_json::<Discussion>(&item_endpoint),
            self.get_json::<Vec<Comment>>(&comments_endpoint),
        )?;

        let item = item.found().ok_or_else(|| {
            Error::ResourceNotFound(format!("{} #{id} details", kind.label().to_lowercase()))
        })?;

        let comments = comments.found().unwrap_or_default();
        let comments_text = if comments.is_empty() {
            NO_COMMENTS.to_string()
        } else {
            comments
                .iter()
                .map(|c| {
                    format!(
                        "Comment by {}:\n{}",
                        login_of(&c.user),
                        c.body.as_deref().unwrap_or_default()
                    )
                })
                .collect::<Vec<_>>()
                .join("\n\n---\n")
        };

        let body = item
            .body
            .as_deref()
            .filter(|b| !b.trim().is_empty())
            .unwrap_or(NO_DESCRIPTION);

        let text = format!(
            "--- {header} #{id}: {title} ---\n\
             Opened by: {author}\n\
             State: {state}\n\n\
             --- BODY ---\n{body}\n--- END BODY ---\n\n\
             --- COMMENTS ---\n{comments_text}\n--- END COMMENTS ---\n",
            title = item.title,
            author = login_of(&item.user),
            state = item.state,
        );

        Ok(FetchedContent {
            text,
            display_name: format!("{} #{id} in {owner}/{repo}", kind.label()),
            kind,
        })
    }
}

// Deleted accounts come back as `"user": null`
fn login_of(user: &Option<User>) -> &str {
    user.as_ref().map(|u| u.login.as_str()).unwrap_or("ghost")
}

// GitHub wraps base64 payloads at 60 columns, so drop whitespace first.
// Non-UTF-8 bytes (binary files, odd encodings) are replaced, not fatal.
fn decode_base64(encoded: &str) -> Result<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| Error::Decode(format!("invalid base64 content: {e}")))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
