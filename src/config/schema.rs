//! Configuration schema and defaults for tally.
//!
//! Defines the TOML-serializable structure with sections `[general]`,
//! `[insight]`, and `[web]`. Every field has a built-in default; users only
//! set the values they want to override.

use serde::{Deserialize, Serialize};

use crate::engine::EngineOptions;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level tally configuration.
///
/// Maps directly to the `~/.tally/config.toml` and `.tally.toml` file
/// schemas. Missing sections and fields fall back to built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    pub general: GeneralConfig,
    pub insight: InsightConfig,
    pub web: WebConfig,
}

impl TallyConfig {
    /// Engine tunables derived from the `[general]` section.
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            workday_hours: self.general.workday_hours,
            leaderboard_size: self.general.leaderboard_size,
            trend_days: self.general.trend_days,
        }
    }

    /// Annotated default config file contents for `tally config init`.
    pub fn default_toml() -> String {
        DEFAULT_CONFIG_TOML.to_string()
    }
}

// ---------------------------------------------------------------------------
// [general]
// ---------------------------------------------------------------------------

/// General reporting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Available hours per employee workday — the utilization denominator.
    pub workday_hours: f64,
    /// Maximum number of leaderboard rows.
    pub leaderboard_size: usize,
    /// Trailing window of the daily trend, in calendar days.
    pub trend_days: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            workday_hours: 8.0,
            leaderboard_size: 10,
            trend_days: 7,
        }
    }
}

// ---------------------------------------------------------------------------
// [insight]
// ---------------------------------------------------------------------------

/// Settings for the narrative insight generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Messages-API base URL.
    pub api_url: String,
    /// Model name sent with each request.
    pub model: String,
    /// Maximum response tokens.
    pub max_tokens: u32,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum number of logs included in the prompt.
    pub max_logs: usize,
    /// API key. Usually left empty here and supplied via `TALLY_API_KEY`.
    pub api_key: String,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.anthropic.com/v1/messages".to_string(),
            model: "claude-3-5-sonnet-20241022".to_string(),
            max_tokens: 2000,
            timeout_ms: 30_000,
            max_logs: 100,
            api_key: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// [web]
// ---------------------------------------------------------------------------

/// Settings for the embedded dashboard server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Listen address for `tally web`.
    pub addr: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:9214".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default config file template
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG_TOML: &str = r#"# tally configuration
#
# Layering (later overrides earlier):
#   built-in defaults -> ~/.tally/config.toml -> .tally.toml -> TALLY_* env vars

[general]
# Available hours per employee workday (utilization denominator).
workday_hours = 8.0
# Maximum number of leaderboard rows.
leaderboard_size = 10
# Trailing window of the daily trend, in calendar days.
trend_days = 7

[insight]
# Messages-API endpoint and model used for narrative generation.
api_url = "https://api.anthropic.com/v1/messages"
model = "claude-3-5-sonnet-20241022"
max_tokens = 2000
timeout_ms = 30000
# At most this many logs are included in the prompt.
max_logs = 100
# Prefer the TALLY_API_KEY environment variable over storing the key here.
api_key = ""

[web]
# Listen address for `tally web`.
addr = "127.0.0.1:9214"
"#;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
