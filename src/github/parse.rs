// src/github/parse.rs
// =============================================================================
// Turns a pasted GitHub URL into a UrlDescriptor.
//
// Patterns are tried in order and the first match wins. The issue, pull and
// blob patterns must come before the two repo patterns, otherwise
// ".../owner/repo/issues/7" would be read as a bare repository.
//
// The last pattern is deliberately loose: anything under github.com/owner/repo
// that nothing else recognised (tree views, wiki pages, ...) becomes a repo.
//
// Owner, repo and file path stop at '?' and '#', so query strings and
// anchors copied from the browser ("?tab=readme-ov-file", "#L10") are dropped.
// =============================================================================

use once_cell::sync::Lazy;
use regex::Regex;

use super::{ResourceKind, UrlDescriptor};

static ISSUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://github\.com/([^/?#]+)/([^/?#]+)/issues/(\d+)").unwrap());
static PULL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://github\.com/([^/?#]+)/([^/?#]+)/pull/(\d+)").unwrap());
static BLOB_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://github\.com/([^/?#]+)/([^/?#]+)/blob/[^/]+/([^?#]+)").unwrap());
static REPO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://github\.com/([^/?#]+)/([^/?#]+)/?$").unwrap());
static ANY_REPO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://github\.com/([^/?#]+)/([^/?#]+)").unwrap());

// Classifies a GitHub URL
//
// Returns None when the text is not a github.com URL with at least an
// owner and a repository segment.
//
// Example:
//   "https://github.com/rust-lang/rust/pull/42"
//   -> UrlDescriptor { owner: "rust-lang", repo_name: "rust", kind: PullRequest, id: Some("42"), .. }
pub fn classify(url: &str) -> Option<UrlDescriptor> {
    let url = url.trim();

    if let Some(caps) = ISSUE_RE.captures(url) {
        return Some(UrlDescriptor::numbered(
            &caps[1],
            &caps[2],
            ResourceKind::Issue,
            &caps[3],
        ));
    }
    if let Some(caps) = PULL_RE.captures(url) {
        return Some(UrlDescriptor::numbered(
            &caps[1],
            &caps[2],
            ResourceKind::PullRequest,
            &caps[3],
        ));
    }
    if let Some(caps) = BLOB_RE.captures(url) {
        return Some(UrlDescriptor::file(&caps[1], &caps[2], &caps[3]));
    }

    REPO_RE
        .captures(url)
        .or_else(|| ANY_REPO_RE.captures(url))
        .map(|caps| UrlDescriptor::repo(&caps[1], &caps[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_issue() {
        let d = classify("https://github.com/rust-lang/rust/issues/12345").unwrap();
        assert_eq!(d.kind, ResourceKind::Issue);
        assert_eq!(d.owner, "rust-lang");
        assert_eq!(d.repo_name, "rust");
        assert_eq!(d.id.as_deref(), Some("12345"));
        assert_eq!(d.path, None);
    }

    #[test]
    fn test_classify_pull_request() {
        let d = classify("https://github.com/tokio-rs/tokio/pull/6000/files").unwrap();
        assert_eq!(d.kind, ResourceKind::PullRequest);
        assert_eq!(d.id.as_deref(), Some("6000"));
    }

    #[test]
    fn test_classify_file_keeps_nested_path() {
        let d = classify("https://github.com/owner/repo/blob/main/src/a/b.ts").unwrap();
        assert_eq!(d.kind, ResourceKind::File);
        assert_eq!(d.path.as_deref(), Some("src/a/b.ts"));
        assert_eq!(d.id, None);
    }

    #[test]
    fn test_classify_repo_trailing_slash() {
        let bare = classify("https://github.com/owner/repo").unwrap();
        let slash = classify("https://github.com/owner/repo/").unwrap();
        assert_eq!(bare, slash);
        assert_eq!(bare.kind, ResourceKind::Repo);
    }

    #[test]
    fn test_classify_other_pages_fall_back_to_repo() {
        let d = classify("https://github.com/owner/repo/tree/main/docs").unwrap();
        assert_eq!(d.kind, ResourceKind::Repo);
        assert_eq!(d.repo_name, "repo");
    }

    #[test]
    fn test_classify_drops_query_and_fragment() {
        let query = classify("https://github.com/o/r?tab=readme-ov-file").unwrap();
        assert_eq!(query.kind, ResourceKind::Repo);
        assert_eq!(query.repo_name, "r");

        let anchor = classify("https://github.com/o/r#readme").unwrap();
        assert_eq!(anchor.repo_name, "r");

        let file = classify("https://github.com/o/r/blob/main/src/lib.rs?plain=1#L10").unwrap();
        assert_eq!(file.path.as_deref(), Some("src/lib.rs"));

        let issue = classify("https://github.com/o/r/issues/5#issuecomment-1").unwrap();
        assert_eq!(issue.id.as_deref(), Some("5"));
    }

    #[test]
    fn test_classify_http_scheme() {
        let d = classify("http://github.com/owner/repo/issues/3").unwrap();
        assert_eq!(d.kind, ResourceKind::Issue);
    }

    #[test]
    fn test_classify_rejects_non_github() {
        assert_eq!(classify("not a url"), None);
        assert_eq!(classify("https://gitlab.com/user/repo"), None);
        assert_eq!(classify("https://github.com/owner"), None);
    }
}
