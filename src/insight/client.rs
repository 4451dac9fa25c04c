//! HTTP client for the messages-style text-generation API.
//!
//! Synchronous `ureq` client, created fresh per generation — one outbound
//! call, no retries, no streaming. The endpoint follows the Anthropic
//! messages shape: a `POST` with `model`, `max_tokens`, and a single user
//! message, answered by a list of content blocks.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::InsightError;
use crate::config::schema::InsightConfig;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// A single message in the request conversation.
#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

/// Request body for the messages endpoint.
#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

/// Response body: the generated text arrives as content blocks.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Synchronous client for one insight generation call.
#[derive(Debug)]
pub struct InsightClient {
    api_url: String,
    model: String,
    api_key: String,
    max_tokens: u32,
    timeout: Duration,
}

impl InsightClient {
    /// Build a client from the resolved config.
    ///
    /// Fails up-front when no API key is configured so the caller gets a
    /// clear message instead of a 401 from the provider.
    pub fn from_config(config: &InsightConfig) -> Result<Self, InsightError> {
        if config.api_key.trim().is_empty() {
            return Err(InsightError::MissingApiKey);
        }
        Ok(Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            max_tokens: config.max_tokens,
            timeout: Duration::from_millis(config.timeout_ms),
        })
    }

    /// Send the prompt and return the generated narrative.
    pub fn generate(&self, prompt: &str) -> Result<String, InsightError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let resp = ureq::post(&self.api_url)
            .timeout(self.timeout)
            .set("x-api-key", &self.api_key)
            .set("anthropic-version", "2023-06-01")
            .send_json(&body)
            .map_err(|e| InsightError::Request(e.to_string()))?;

        let parsed: MessagesResponse = resp
            .into_json()
            .map_err(|e| InsightError::MalformedResponse(e.to_string()))?;

        let text: String = parsed
            .content
            .into_iter()
            .map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(InsightError::EmptyResponse);
        }

        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
