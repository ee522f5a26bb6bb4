// src/summarize/prompt.rs
// =============================================================================
// Builds the instruction prompt sent to the LLM.
//
// One template per resource kind. Issues and pull requests share a template
// that only differs in wording. Content is cut to MAX_PROMPT_CHARS first.
// =============================================================================

use crate::github::ResourceKind;

pub const MAX_PROMPT_CHARS: usize = 30_000;

// Hard cutoff on character (not byte) count, so multi-byte text is never
// split in the middle of a code point.
pub fn truncate_content(content: &str) -> &str {
    match content.char_indices().nth(MAX_PROMPT_CHARS) {
        Some((byte_index, _)) => &content[..byte_index],
        None => content,
    }
}

pub fn build_prompt(kind: ResourceKind, name: &str, content: &str) -> String {
    build_prompt_for(Some(kind), name, content)
}

// Same as build_prompt, for callers holding a kind they could not parse
// (e.g. a "kind" string from JSON). None gets the generic template.
pub fn build_prompt_for(kind: Option<ResourceKind>, name: &str, content: &str) -> String {
    let content = truncate_content(content);

    match kind {
        Some(ResourceKind::Repo) => format!(
            "Please act as an expert software engineer reviewing a project.\n\
             Summarize the following GitHub repository content, which includes its README and a list of recent open issues.\n\
             Focus on:\n\
             1. The project's main purpose and functionality based on the README.\n\
             2. The current development status or areas of focus, as indicated by the open issues.\n\
             The summary should give a developer a quick, high-level understanding of the project.\n\n\
             CONTENT FROM REPOSITORY '{name}':\n\
             ---\n\
             {content}\n\
             ---\n"
        ),
        Some(kind @ (ResourceKind::Issue | ResourceKind::PullRequest)) => {
            let item_type = if kind == ResourceKind::Issue {
                "issue thread"
            } else {
                "pull request discussion"
            };
            format!(
                "Please act as an expert software engineer analyzing a discussion.\n\
                 Summarize the following GitHub {item_type}, including the original post and all comments.\n\
                 Focus on:\n\
                 1. What is the core problem or proposed change?\n\
                 2. What are the key points, suggestions, or feedback from the comments?\n\
                 3. What is the current status or conclusion of the discussion?\n\
                 The summary should be concise and capture the essence of the conversation.\n\n\
                 CONTENT FROM {name}:\n\
                 ---\n\
                 {content}\n\
                 ---\n"
            )
        }
        Some(ResourceKind::File) => format!(
            "Please act as an expert software engineer.\n\
             Provide a concise summary of the following content from a GitHub file named '{name}'.\n\
             Focus on its primary purpose, key functionalities, and overall structure.\n\
             The summary should be easy to understand for another developer at a glance. Explain what the code does.\n\n\
             CONTENT:\n\
             ---\n\
             {content}\n\
             ---\n"
        ),
        None => format!("Summarize this content: {content}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Pulls the text between the two "---" fences back out of a prompt
    fn embedded(prompt: &str) -> &str {
        let start = prompt.find("\n---\n").unwrap() + "\n---\n".len();
        let end = prompt.rfind("\n---\n").unwrap();
        &prompt[start..end]
    }

    #[test]
    fn test_file_prompt_truncates_to_limit() {
        let content = "x".repeat(MAX_PROMPT_CHARS + 5_000);
        let prompt = build_prompt(ResourceKind::File, "src/main.rs", &content);
        assert_eq!(embedded(&prompt).chars().count(), MAX_PROMPT_CHARS);
        assert!(prompt.contains("GitHub file named 'src/main.rs'"));
    }

    #[test]
    fn test_short_content_is_untouched() {
        let prompt = build_prompt(ResourceKind::File, "a.rs", "fn main() {}");
        assert_eq!(embedded(&prompt), "fn main() {}");
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let content = "é".repeat(MAX_PROMPT_CHARS + 1);
        let cut = truncate_content(&content);
        assert_eq!(cut.chars().count(), MAX_PROMPT_CHARS);
        assert_eq!(cut.len(), MAX_PROMPT_CHARS * 2);
    }

    #[test]
    fn test_discussion_wording() {
        let issue = build_prompt(ResourceKind::Issue, "Issue #1 in o/r", "body");
        let pr = build_prompt(ResourceKind::PullRequest, "Pull Request #2 in o/r", "body");
        assert!(issue.contains("GitHub issue thread"));
        assert!(pr.contains("GitHub pull request discussion"));
        assert!(pr.contains("CONTENT FROM Pull Request #2 in o/r:"));
    }

    #[test]
    fn test_repo_prompt_names_repository() {
        let prompt = build_prompt(ResourceKind::Repo, "o/r", "readme");
        assert!(prompt.contains("CONTENT FROM REPOSITORY 'o/r':"));
        assert!(prompt.contains("recent open issues"));
    }

    #[test]
    fn test_unknown_kind_uses_generic_template() {
        let prompt = build_prompt_for(None, "whatever", "some text");
        assert_eq!(prompt, "Summarize this content: some text");
    }
}
