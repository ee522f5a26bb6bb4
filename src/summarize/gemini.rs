// src/summarize/gemini.rs
// =============================================================================
// Summarizer backed by Google's Gemini generateContent REST endpoint.
//
// One request per call, no retries. Failures are collapsed into three
// outcomes the front end can act on:
//   InvalidCredential   - the API said the key is not valid
//   EmptySummary        - the call worked but produced no text
//   SummarizationFailed - anything else (details go to the log)
//
// Rust concepts:
// - map_err: turn reqwest/serde errors into our own Error type
// - Option::ok_or: "no text" becomes Error::EmptySummary
// =============================================================================

use reqwest::Client;

use super::models::{ErrorEnvelope, GenerateRequest, GenerateResponse};
use super::{prompt, Summarizer};
use crate::config::{normalize_base, Config};
use crate::error::{Error, Result};
use crate::github::ResourceKind;

// Substring Gemini uses when rejecting a key
const INVALID_KEY_MARKER: &str = "API key not valid";

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    base: String,
    model: String,
}

impl GeminiClient {
    pub fn new() -> Result<Self> {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            base: normalize_base(&config.gemini_api_base)?,
            model: config.model.clone(),
        })
    }

    async fn generate(&self, prompt: String, api_key: &str) -> Result<String> {
        // e.g. https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent
        let url = format!("{}/models/{}:generateContent", self.base, self.model);
        tracing::debug!(model = %self.model, prompt_bytes = prompt.len(), "Gemini request");

        // The key goes in a header rather than the query string so it
        // doesn't end up in URLs printed by error messages
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&GenerateRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| classify_failure(&e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Gemini wraps errors as {"error": {"message": ...}}; if the body
            // is something else, classify the raw text instead
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            tracing::error!(%status, %message, "Gemini API error");
            return Err(classify_failure(&message));
        }

        // A 200 can still carry no text (e.g. a blocked prompt)
        let response = response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| classify_failure(&e.to_string()))?;

        response.text().ok_or(Error::EmptySummary)
    }
}

impl Summarizer for GeminiClient {
    async fn summarize(
        &self,
        content: &str,
        kind: ResourceKind,
        name: &str,
        credential: &str,
    ) -> Result<String> {
        // Checked before building the prompt, so no request goes out
        if credential.trim().is_empty() {
            return Err(Error::MissingCredential);
        }

        let prompt = prompt::build_prompt(kind, name, content);
        self.generate(prompt, credential.trim()).await
    }
}

// Maps an error message from the LLM call to the error the caller sees
fn classify_failure(message: &str) -> Error {
    if message.contains(INVALID_KEY_MARKER) {
        Error::InvalidCredential
    } else {
        tracing::warn!(%message, "summary generation failed");
        Error::SummarizationFailed
    }
}
