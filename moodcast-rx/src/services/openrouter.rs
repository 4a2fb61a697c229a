//! OpenRouter chat-completion client
//!
//! Sends a single-message conversation and parses the completion content as
//! a strict JSON array of song descriptors. The content is untrusted text:
//! it is only ever fed to `serde_json`, and anything that is not a valid
//! array (prose preamble, truncated output, markdown wrapper around
//! non-JSON) maps to `Suggestions::Unparseable`.

use async_trait::async_trait;
use moodcast_common::SongDescriptor;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use super::SongSuggester;

const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Generous client-level timeout; the model call has no tighter bound.
const COMPLETION_TIMEOUT: Duration = Duration::from_secs(60);

/// Chat-completion client errors
#[derive(Debug, Error)]
pub enum SuggestError {
    /// Request could not be sent or the body could not be read
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream returned a non-success status
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Response body carried no completion
    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),
}

/// Outcome of one suggestion request.
///
/// `Songs(vec![])` means the model answered with an empty array;
/// `Unparseable` means the content was not a strict JSON array at all.
#[derive(Debug, Clone, PartialEq)]
pub enum Suggestions {
    Songs(Vec<SongDescriptor>),
    Unparseable,
}

/// OpenRouter API client
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    api_key: String,
    model: String,
    base_url: String,
    http: reqwest::Client,
}

impl OpenRouterClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_base_url(api_key, model, OPENROUTER_URL.to_string())
    }

    /// Construct against an alternate endpoint (integration tests).
    pub fn with_base_url(api_key: String, model: String, base_url: String) -> Self {
        Self {
            api_key,
            model,
            base_url,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SongSuggester for OpenRouterClient {
    async fn suggest(&self, prompt: &str) -> Result<Suggestions, SuggestError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.7,
        };

        let res = self
            .http
            .post(&self.base_url)
            .timeout(COMPLETION_TIMEOUT)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SuggestError::Network(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| SuggestError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(SuggestError::Api(status.as_u16(), truncate_body(&body)));
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| SuggestError::MalformedResponse(e.to_string()))?;

        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| SuggestError::MalformedResponse("no choices in response".to_string()))?;

        Ok(parse_suggestions(content))
    }
}

/// Strictly parse completion content as a JSON array of songs.
pub fn parse_suggestions(content: &str) -> Suggestions {
    let text = strip_code_fence(content.trim());

    match serde_json::from_str::<Vec<SongDescriptor>>(text) {
        Ok(songs) => Suggestions::Songs(songs),
        Err(e) => {
            tracing::warn!("Completion content was not a JSON array: {}", e);
            Suggestions::Unparseable
        }
    }
}

/// Strip a surrounding markdown code fence, if present.
///
/// Models routinely wrap JSON in ```json ... ``` despite instructions not
/// to; the unwrapped text is still parsed strictly.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return text;
    };
    // Drop the language tag on the opening fence line
    match inner.split_once('\n') {
        Some((_, body)) => body.trim(),
        None => inner.trim(),
    }
}

/// Truncate an upstream body for error messages, respecting char boundaries.
fn truncate_body(body: &str) -> String {
    const MAX_CHARS: usize = 200;
    match body.char_indices().nth(MAX_CHARS) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}
