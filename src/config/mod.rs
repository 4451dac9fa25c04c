/// Configuration system for tally.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults** — hardcoded in [`schema::TallyConfig::default()`]
/// 2. **User global config** — `~/.tally/config.toml`
/// 3. **Project local config** — `.tally.toml` in the current working directory
/// 4. **Environment variables** — `TALLY_*` overrides (highest precedence)
///
/// Later layers override earlier ones. Missing sections in a TOML file fall
/// back to the previous layer's values; malformed files are silently ignored
/// so a broken config never blocks report generation.
pub mod schema;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub use schema::TallyConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved tally configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars. This is the primary entry point for every module that needs
/// configuration.
pub fn load() -> TallyConfig {
    let mut config = TallyConfig::default();

    // Layer 2: user global config (~/.tally/config.toml)
    if let Some(global) = load_toml_file(global_config_path()) {
        config = global;
    }

    // Layer 3: project local config (.tally.toml)
    if let Some(project) = load_toml_file(project_config_path()) {
        config = project;
    }

    // Layer 4: environment variable overrides
    apply_env_overrides(&mut config);

    config
}

/// Load a TOML config file from the given path (if it exists).
///
/// Each file is deserialized with `serde(default)`, so keys the user did not
/// set arrive as built-in defaults — replacing the previous layer wholesale
/// is equivalent to field-level merging for explicitly-set values.
fn load_toml_file(path: Option<PathBuf>) -> Option<TallyConfig> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.tally/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".tally").join("config.toml"))
}

/// Path to the project local config: `.tally.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".tally.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `TALLY_WORKDAY_HOURS` — utilization denominator
/// - `TALLY_LEADERBOARD_SIZE` — maximum leaderboard rows
/// - `TALLY_TREND_DAYS` — trend window length
/// - `TALLY_INSIGHT_URL` — messages-API endpoint
/// - `TALLY_INSIGHT_MODEL` — model name
/// - `TALLY_INSIGHT_TIMEOUT_MS` — insight request timeout
/// - `TALLY_API_KEY` — insight API key
/// - `TALLY_WEB_ADDR` — dashboard listen address
fn apply_env_overrides(config: &mut TallyConfig) {
    if let Ok(val) = std::env::var("TALLY_WORKDAY_HOURS")
        && let Ok(hours) = val.parse::<f64>()
        && hours > 0.0
    {
        config.general.workday_hours = hours;
    }
    if let Ok(val) = std::env::var("TALLY_LEADERBOARD_SIZE")
        && let Ok(n) = val.parse::<usize>()
    {
        config.general.leaderboard_size = n;
    }
    if let Ok(val) = std::env::var("TALLY_TREND_DAYS")
        && let Ok(days) = val.parse::<u32>()
        && days > 0
    {
        config.general.trend_days = days;
    }

    if let Ok(val) = std::env::var("TALLY_INSIGHT_URL")
        && !val.is_empty()
    {
        config.insight.api_url = val;
    }
    if let Ok(val) = std::env::var("TALLY_INSIGHT_MODEL")
        && !val.is_empty()
    {
        config.insight.model = val;
    }
    if let Ok(val) = std::env::var("TALLY_INSIGHT_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.insight.timeout_ms = ms;
    }
    if let Ok(val) = std::env::var("TALLY_API_KEY")
        && !val.is_empty()
    {
        config.insight.api_key = val;
    }

    if let Ok(val) = std::env::var("TALLY_WEB_ADDR")
        && !val.is_empty()
    {
        config.web.addr = val;
    }
}

// ---------------------------------------------------------------------------
// Config init / set / reset / show
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.tally/config.toml`.
///
/// Creates the `~/.tally/` directory if needed. Returns an error if the file
/// already exists (use `force = true` to overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.tally/ directory")?;
    }

    fs::write(&path, TallyConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a single config key in the global config file.
///
/// Supports dotted keys like `general.trend_days`. When no global file
/// exists yet, one is created from defaults first so the update lands in a
/// complete document.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let content = if path.exists() {
        fs::read_to_string(&path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&TallyConfig::default())
            .context("failed to serialize default config")?
    };

    let mut root: toml::Value =
        toml::from_str(&content).context("failed to parse config as TOML")?;
    set_toml_value(&mut root, key, value)?;

    // The updated document must still deserialize as a valid config.
    let rendered = toml::to_string_pretty(&root).context("failed to serialize config")?;
    let _: TallyConfig =
        toml::from_str(&rendered).with_context(|| format!("'{value}' is invalid for '{key}'"))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, rendered).context("failed to write config file")?;

    Ok(())
}

/// Set a value in a TOML value tree using a dotted key path, preserving the
/// type of the existing value where one exists.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let Some((section, leaf)) = key.split_once('.') else {
        anyhow::bail!("config key must be section.field, got '{key}'");
    };

    let table = root
        .get_mut(section)
        .with_context(|| format!("unknown config section '{section}'"))?
        .as_table_mut()
        .with_context(|| format!("'{section}' is not a table"))?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(matches!(
            raw_value.to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::Float(_)) => {
            let f: f64 = raw_value
                .parse()
                .with_context(|| format!("expected number for '{key}', got '{raw_value}'"))?;
            toml::Value::Float(f)
        }
        _ => toml::Value::String(raw_value.to_string()),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
