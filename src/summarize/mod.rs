// src/summarize/mod.rs
// =============================================================================
// The LLM half of the pipeline.
//
// Submodules:
// - prompt: per-kind instruction templates + content truncation
// - gemini: the Gemini REST client
// - models: its request/response bodies
// =============================================================================

mod gemini;
mod models;
pub mod prompt;

use std::future::Future;

pub use gemini::GeminiClient;
pub use prompt::{build_prompt, MAX_PROMPT_CHARS};

use crate::error::Result;
use crate::github::ResourceKind;

pub trait Summarizer {
    /// Summarizes already-fetched content. Fails with MissingCredential
    /// before doing any I/O when `credential` is empty.
    fn summarize(
        &self,
        content: &str,
        kind: ResourceKind,
        name: &str,
        credential: &str,
    ) -> impl Future<Output = Result<String>>;
}

// Summarizes content with the default Gemini model
//
// Second entry point of the library, the counterpart of github::get_content.
pub async fn summarize_content(
    content: &str,
    kind: ResourceKind,
    name: &str,
    credential: &str,
) -> Result<String> {
    GeminiClient::new()?
        .summarize(content, kind, name, credential)
        .await
}
