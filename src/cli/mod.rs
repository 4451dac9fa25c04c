//! CLI command implementations for tally reporting and diagnostics.
//!
//! Provides subcommand handlers for:
//! - `tally submit` — validate a daily submission and append its task logs
//! - `tally report` — executive summary over the filtered logs
//! - `tally departments` — per-department performance rollup
//! - `tally leaderboard` — top employees by completed tasks
//! - `tally trend` — daily totals over the trailing window
//! - `tally quality` — form-completeness scores
//! - `tally export` — CSV dump of the filtered logs
//! - `tally insight` — cached or freshly generated narrative analysis
//! - `tally health` — check store, config, insight API key, cache
//! - `tally config show|init|set|reset` — configuration management

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use colored::Colorize;

use crate::config;
use crate::engine::{
    self, DepartmentPerformance, LeaderboardEntry, LogFilter, MetricsBundle, TrendPoint,
};
use crate::export;
use crate::insight::{self, FileCache, InsightCache};
use crate::model::{DailyLogSubmission, Department, ProductivityLog, expand_submission};
use crate::store::LogStore;

/// Output format for reporting commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

// ---------------------------------------------------------------------------
// Filter arguments
// ---------------------------------------------------------------------------

/// Raw `--start/--end/--department/--employee` values from the command line.
#[derive(Debug, Clone, Default)]
pub struct FilterArgs {
    pub start: Option<String>,
    pub end: Option<String>,
    pub department: Option<String>,
    pub employee: Option<String>,
}

impl FilterArgs {
    /// Parse the raw values into a [`LogFilter`].
    ///
    /// Dates must be `YYYY-MM-DD`; department names must match one of the
    /// known departments (case-insensitive).
    pub fn parse(&self) -> Result<LogFilter> {
        let start = self.start.as_deref().map(parse_date).transpose()?;
        let end = self.end.as_deref().map(parse_date).transpose()?;
        let department = self
            .department
            .as_deref()
            .map(|s| {
                Department::parse(s)
                    .with_context(|| format!("unknown department '{s}'. Run `tally departments` for the full list."))
            })
            .transpose()?;

        Ok(LogFilter {
            start,
            end,
            department,
            employee: self.employee.clone(),
        })
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid date '{s}' (expected YYYY-MM-DD)"))
}

// ---------------------------------------------------------------------------
// Shared loading
// ---------------------------------------------------------------------------

/// Load every stored log plus the resolved config, the common preamble of all
/// reporting commands.
fn load_snapshot() -> Result<(Vec<ProductivityLog>, config::TallyConfig)> {
    let store = LogStore::open_default()?;
    let logs = store.read_all()?;
    Ok((logs, config::load()))
}

fn compute(logs: &[ProductivityLog], filter: &LogFilter, cfg: &config::TallyConfig) -> MetricsBundle {
    engine::compute_metrics(logs, filter, Local::now().date_naive(), &cfg.engine_options())
}

// ---------------------------------------------------------------------------
// tally submit
// ---------------------------------------------------------------------------

/// Validate a daily submission (JSON from a file or stdin) and append the
/// expanded task logs to the store.
pub fn run_submit(file: Option<PathBuf>) -> Result<()> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read submission from stdin")?;
            buf
        }
    };

    let submission: DailyLogSubmission =
        serde_json::from_str(&raw).context("submission is not valid JSON")?;
    let logs = expand_submission(&submission)?;

    if logs.is_empty() {
        println!("{}", "Submission has no tasks — nothing to record.".yellow());
        return Ok(());
    }

    let store = LogStore::open_default()?;
    store.append_all(&logs)?;

    println!(
        "{} Recorded {} task log{} for {} on {}",
        "✓".green().bold(),
        logs.len(),
        if logs.len() == 1 { "" } else { "s" },
        submission.employee_name.bold(),
        submission.date,
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// tally report
// ---------------------------------------------------------------------------

/// Show the executive summary over the filtered logs.
pub fn run_report(format: OutputFormat, filter_args: &FilterArgs) -> Result<()> {
    let filter = filter_args.parse()?;
    let (logs, cfg) = load_snapshot()?;

    if logs.is_empty() {
        println!("{}", "No logs yet. Run `tally submit` to record some.".yellow());
        return Ok(());
    }

    let bundle = compute(&logs, &filter, &cfg);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&bundle)?),
        OutputFormat::Csv => print_report_csv(&bundle),
        OutputFormat::Table => print_report_table(&bundle, &filter),
    }

    Ok(())
}

fn print_report_table(bundle: &MetricsBundle, filter: &LogFilter) {
    let summary = &bundle.executive_summary;

    println!("{}", "Tally Productivity Report".bold().cyan());
    println!("{}", "=".repeat(60));
    if !filter.is_empty() {
        println!("  {}", describe_filter(filter).dimmed());
    }
    println!();

    println!("  {} {}", "Total tasks:    ".bold(), summary.total_tasks);
    println!("  {} {}", "Completed:      ".bold(), summary.completed_tasks);
    println!("  {} {:.1}%", "Completion rate:".bold(), summary.completion_rate);
    println!("  {} {:.1}", "Total hours:    ".bold(), summary.total_hours);
    println!("  {} {:.2}h", "Avg duration:   ".bold(), summary.avg_task_duration);
    println!("  {} {:.1}%", "Utilization:    ".bold(), summary.overall_utilization_rate);
    println!();

    println!("  {} {}", "Top department:  ".bold(), summary.top_performing_dept.green());
    println!(
        "  {} {}",
        "Needs attention: ".bold(),
        summary.least_performing_dept.yellow()
    );
    println!();

    let dist = &bundle.status_distribution;
    println!("{}", "Status Distribution".bold().cyan());
    println!(
        "  Complete: {}  In Progress: {}  Incomplete: {}",
        dist.complete.to_string().green(),
        dist.in_progress.to_string().yellow(),
        dist.incomplete.to_string().red(),
    );
    println!();

    let quality = &bundle.data_quality;
    println!("{}", "Data Quality".bold().cyan());
    println!(
        "  Form completeness: {:.1}%  Missing time entries: {:.1}%",
        quality.form_completeness_score, quality.missing_time_entries_pct,
    );
}

fn print_report_csv(bundle: &MetricsBundle) {
    let s = &bundle.executive_summary;
    println!(
        "total_tasks,completed_tasks,completion_rate,total_hours,avg_task_duration,top_dept,least_dept,utilization_rate"
    );
    println!(
        "{},{},{:.1},{:.1},{:.2},{},{},{:.1}",
        s.total_tasks,
        s.completed_tasks,
        s.completion_rate,
        s.total_hours,
        s.avg_task_duration,
        s.top_performing_dept,
        s.least_performing_dept,
        s.overall_utilization_rate,
    );
}

// ---------------------------------------------------------------------------
// tally departments
// ---------------------------------------------------------------------------

/// Show the per-department performance rollup.
pub fn run_departments(format: OutputFormat, filter_args: &FilterArgs) -> Result<()> {
    let filter = filter_args.parse()?;
    let (logs, cfg) = load_snapshot()?;
    let bundle = compute(&logs, &filter, &cfg);

    if bundle.departments.is_empty() {
        println!("{}", "No department has any tasks in this range.".yellow());
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&bundle.departments)?),
        OutputFormat::Csv => print_departments_csv(&bundle.departments),
        OutputFormat::Table => print_departments_table(&bundle.departments),
    }

    Ok(())
}

fn print_departments_table(rows: &[DepartmentPerformance]) {
    println!("{}", "Department Performance".bold().cyan());
    println!("{}", "=".repeat(66));
    println!(
        "  {:<22} {:>6} {:>10} {:>10} {:>11}",
        "Department", "Tasks", "Complete", "Avg hrs", "Utilization"
    );
    println!("  {}", "-".repeat(64));

    for (i, row) in rows.iter().enumerate() {
        let line = format!(
            "  {:<22} {:>6} {:>9.1}% {:>9.2}h {:>10.1}%",
            truncate(row.department.as_str(), 22),
            row.total_tasks,
            row.completion_rate,
            row.avg_task_duration,
            row.utilization_rate,
        );
        if i % 2 == 0 {
            println!("{}", line);
        } else {
            println!("{}", line.dimmed());
        }
    }
}

fn print_departments_csv(rows: &[DepartmentPerformance]) {
    println!("department,total_tasks,completion_rate,avg_task_duration,utilization_rate");
    for row in rows {
        println!(
            "{},{},{:.1},{:.2},{:.1}",
            row.department, row.total_tasks, row.completion_rate, row.avg_task_duration, row.utilization_rate,
        );
    }
}

// ---------------------------------------------------------------------------
// tally leaderboard
// ---------------------------------------------------------------------------

/// Show the top employees by completed tasks.
pub fn run_leaderboard(format: OutputFormat, filter_args: &FilterArgs) -> Result<()> {
    let filter = filter_args.parse()?;
    let (logs, cfg) = load_snapshot()?;
    let bundle = compute(&logs, &filter, &cfg);

    if bundle.leaderboard.is_empty() {
        println!("{}", "No employees in this range.".yellow());
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&bundle.leaderboard)?),
        OutputFormat::Csv => print_leaderboard_csv(&bundle.leaderboard),
        OutputFormat::Table => print_leaderboard_table(&bundle.leaderboard),
    }

    Ok(())
}

fn print_leaderboard_table(rows: &[LeaderboardEntry]) {
    println!("{}", "Employee Leaderboard".bold().cyan());
    println!("{}", "=".repeat(58));
    println!(
        "  {:>3} {:<24} {:>9} {:>8} {:>11}",
        "#", "Employee", "Completed", "Avg hrs", "Utilization"
    );
    println!("  {}", "-".repeat(56));

    for (i, row) in rows.iter().enumerate() {
        println!(
            "  {:>3} {:<24} {:>9} {:>7.2}h {:>10.1}%",
            i + 1,
            truncate(&row.name, 24),
            row.completed_tasks,
            row.avg_task_duration,
            row.utilization_rate,
        );
    }
}

fn print_leaderboard_csv(rows: &[LeaderboardEntry]) {
    println!("rank,name,completed_tasks,avg_task_duration,utilization_rate");
    for (i, row) in rows.iter().enumerate() {
        println!(
            "{},{},{},{:.2},{:.1}",
            i + 1,
            row.name,
            row.completed_tasks,
            row.avg_task_duration,
            row.utilization_rate,
        );
    }
}

// ---------------------------------------------------------------------------
// tally trend
// ---------------------------------------------------------------------------

/// Show daily task totals over the trailing window.
///
/// The trend always covers all stored logs; filters do not apply here.
pub fn run_trend(format: OutputFormat) -> Result<()> {
    let (logs, cfg) = load_snapshot()?;
    let trend = engine::daily_trend(&logs, Local::now().date_naive(), cfg.general.trend_days);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&trend)?),
        OutputFormat::Csv => print_trend_csv(&trend),
        OutputFormat::Table => print_trend_table(&trend, cfg.general.trend_days),
    }

    Ok(())
}

fn print_trend_table(trend: &[TrendPoint], days: u32) {
    println!(
        "{}",
        format!("Daily Trend — Last {} Days", days).bold().cyan()
    );
    println!("{}", "=".repeat(44));
    println!("  {:<12} {:>8} {:>11}", "Date", "Tasks", "Completed");
    println!("  {}", "-".repeat(42));

    for point in trend {
        println!(
            "  {:<12} {:>8} {:>11}",
            point.date, point.total_tasks, point.completed_tasks,
        );
    }
}

fn print_trend_csv(trend: &[TrendPoint]) {
    println!("date,total_tasks,completed_tasks");
    for point in trend {
        println!("{},{},{}", point.date, point.total_tasks, point.completed_tasks);
    }
}

// ---------------------------------------------------------------------------
// tally quality
// ---------------------------------------------------------------------------

/// Show form-completeness scores over the filtered logs.
pub fn run_quality(format: OutputFormat, filter_args: &FilterArgs) -> Result<()> {
    let filter = filter_args.parse()?;
    let (logs, cfg) = load_snapshot()?;
    let bundle = compute(&logs, &filter, &cfg);
    let quality = &bundle.data_quality;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(quality)?),
        OutputFormat::Csv => {
            println!("form_completeness_score,missing_time_entries_pct");
            println!(
                "{:.1},{:.1}",
                quality.form_completeness_score, quality.missing_time_entries_pct
            );
        }
        OutputFormat::Table => {
            println!("{}", "Data Quality".bold().cyan());
            println!("{}", "=".repeat(40));
            println!(
                "  {} {:.1}%",
                "Form completeness:   ".bold(),
                quality.form_completeness_score
            );
            println!(
                "  {} {:.1}%",
                "Missing time entries:".bold(),
                quality.missing_time_entries_pct
            );
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// tally export
// ---------------------------------------------------------------------------

/// Write the filtered logs as CSV to a file, or stdout when no path given.
pub fn run_export(filter_args: &FilterArgs, output: Option<PathBuf>) -> Result<()> {
    let filter = filter_args.parse()?;
    let store = LogStore::open_default()?;
    let logs = store.read_all()?;
    let filtered = engine::filter_logs(&logs, &filter);
    let csv = export::logs_to_csv(&filtered);

    match output {
        Some(path) => {
            std::fs::write(&path, &csv)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "{} Exported {} log{} to {}",
                "✓".green().bold(),
                filtered.len(),
                if filtered.len() == 1 { "" } else { "s" },
                path.display(),
            );
        }
        None => print!("{csv}"),
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// tally insight
// ---------------------------------------------------------------------------

/// Show the cached narrative, or generate a fresh one.
///
/// Without `--regenerate`, a cached narrative is printed as-is and no request
/// is made. With it, the current logs are re-analyzed and the cache replaced.
pub fn run_insight(regenerate: bool) -> Result<()> {
    let cache = FileCache::open_default().context("could not determine home directory")?;

    if !regenerate && let Some(cached) = cache.get() {
        println!("{cached}");
        println!();
        println!(
            "  {}",
            "Cached analysis. Run `tally insight --regenerate` for a fresh one.".dimmed()
        );
        return Ok(());
    }

    let store = LogStore::open_default()?;
    let logs = store.read_all()?;
    let cfg = config::load();

    eprintln!("{}", "Generating analysis…".dimmed());
    let text = insight::generate_and_cache(&logs, &cfg.insight, &cache)?;
    println!("{text}");

    Ok(())
}

// ---------------------------------------------------------------------------
// tally health
// ---------------------------------------------------------------------------

/// Check system health: log store, config files, insight API key, cache.
pub fn run_health() -> Result<()> {
    println!("{}", "Tally Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    // 0. Config file status
    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let cfg = config::load();
    print_health_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.tally/config.toml found"
        } else {
            "not found (run `tally config init` to create)"
        },
    );
    print_health_item(
        "Project config",
        project_exists,
        if project_exists {
            ".tally.toml found"
        } else {
            "none (optional)"
        },
    );

    // 1. Log store
    match LogStore::open_default() {
        Ok(store) => {
            let exists = store.exists();
            let count = store.read_all().map(|logs| logs.len()).unwrap_or(0);
            print_health_item(
                "Log store",
                exists,
                &if exists {
                    format!("{} logs at {}", count, store.path().display())
                } else {
                    "no log file yet (run `tally submit`)".to_string()
                },
            );
        }
        Err(e) => print_health_item("Log store", false, &e.to_string()),
    }

    // 2. Insight API key + model
    let key_set = !cfg.insight.api_key.trim().is_empty();
    print_health_item(
        "Insight API key",
        key_set,
        if key_set {
            "configured"
        } else {
            "not set (set TALLY_API_KEY to enable `tally insight`)"
        },
    );
    print_health_item("Insight model", true, &cfg.insight.model);

    // 3. Cached narrative
    let cached = FileCache::open_default()
        .map(|c| c.get().is_some())
        .unwrap_or(false);
    print_health_item(
        "Cached insight",
        cached,
        if cached {
            "~/.tally/insight.md present"
        } else {
            "none yet"
        },
    );

    // 4. Dashboard address
    print_health_item("Dashboard", true, &format!("tally web → http://{}", cfg.web.addr));

    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<17} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// tally config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective Tally Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    // Show source info
    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    if global_exists {
        println!("  {} {}", "✓".green(), "~/.tally/config.toml".dimmed());
    } else {
        println!(
            "  {} {}",
            "·".dimmed(),
            "~/.tally/config.toml (not found)".dimmed()
        );
    }
    if project_exists {
        println!("  {} {}", "✓".green(), ".tally.toml".dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), ".tally.toml (not found)".dimmed());
    }
    println!(
        "  {} {}",
        "·".dimmed(),
        "TALLY_* environment variables".dimmed()
    );

    Ok(())
}

/// Initialize a default config file at `~/.tally/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    println!("  {}", "Edit the file to customize tally behavior.".dimmed());
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// One-line human description of an active filter.
fn describe_filter(filter: &LogFilter) -> String {
    let mut parts = Vec::new();
    if let Some(start) = filter.start {
        parts.push(format!("from {start}"));
    }
    if let Some(end) = filter.end {
        parts.push(format!("to {end}"));
    }
    if let Some(dept) = filter.department {
        parts.push(format!("department {dept}"));
    }
    if let Some(ref employee) = filter.employee {
        parts.push(format!("employee '{employee}'"));
    }
    format!("Filter: {}", parts.join(", "))
}

/// Truncate a string to `max_len` characters, appending "…" if truncated.
///
/// Counts `char`s, not bytes — employee names are arbitrary user input and
/// a byte slice could split a multi-byte character.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
