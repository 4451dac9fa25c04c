//! Narrative insight generation.
//!
//! Turns a set of productivity logs into a markdown analysis via a single
//! messages-API call: [`prompts`] builds the analyst prompt, [`client`] does
//! the HTTP round trip, and [`cache`] keeps the last narrative so the
//! dashboard can show it without re-spending tokens.

pub mod cache;
pub mod client;
pub mod prompts;

use thiserror::Error;

pub use cache::{FileCache, InsightCache, MemoryCache};
pub use client::InsightClient;
pub use prompts::build_insight_prompt;

use crate::config::schema::InsightConfig;
use crate::model::ProductivityLog;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures while generating a narrative insight.
#[derive(Debug, Error)]
pub enum InsightError {
    /// Generation was requested over zero logs; there is nothing to analyze.
    #[error("no logs to analyze — submit some logs first")]
    NoLogs,

    /// No API key in config or `TALLY_API_KEY`.
    #[error("no API key configured — set TALLY_API_KEY or [insight] api_key")]
    MissingApiKey,

    /// The HTTP request failed (network, timeout, or non-2xx status).
    #[error("insight request failed: {0}")]
    Request(String),

    /// The response arrived but did not match the expected shape.
    #[error("could not parse insight response: {0}")]
    MalformedResponse(String),

    /// The response parsed but carried no text.
    #[error("insight response contained no text")]
    EmptyResponse,
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generate a fresh narrative over the given logs.
///
/// Rejects an empty log set before any network traffic. The prompt includes
/// at most `config.max_logs` records.
pub fn generate_insights(
    logs: &[ProductivityLog],
    config: &InsightConfig,
) -> Result<String, InsightError> {
    if logs.is_empty() {
        return Err(InsightError::NoLogs);
    }

    let client = InsightClient::from_config(config)?;
    let prompt = build_insight_prompt(logs, config.max_logs);
    client.generate(&prompt)
}

/// Generate a narrative and store it in the given cache.
///
/// The cache write is best-effort; a failed write never turns a successful
/// generation into an error.
pub fn generate_and_cache(
    logs: &[ProductivityLog],
    config: &InsightConfig,
    cache: &dyn InsightCache,
) -> Result<String, InsightError> {
    let text = generate_insights(logs, config)?;
    cache.set(&text);
    Ok(text)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
