// src/lib.rs
// =============================================================================
// gh-digest: summarize GitHub repositories, files, issues and pull requests.
//
// Two entry points:
//   get_content(url)                                -> FetchedContent
//   summarize_content(text, kind, name, credential) -> String
//
// They share no state; the output of the first is the input of the second.
// =============================================================================

pub mod config;
pub mod error;
pub mod github;
pub mod summarize;

pub use config::Config;
pub use error::{Error, Result};
pub use github::{classify, get_content, FetchedContent, GithubClient, ResourceKind, UrlDescriptor};
pub use summarize::{summarize_content, GeminiClient, Summarizer};
