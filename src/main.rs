use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use tally::cli;
use tally::config;
use tally::web;

#[derive(Debug, Parser)]
#[command(name = "tally")]
#[command(about = "Productivity log tracking with KPI reports and team insights")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

/// Report filter flags shared by every reporting subcommand.
#[derive(Debug, Args)]
struct FilterOpts {
    /// Only include logs on or after this date (YYYY-MM-DD)
    #[arg(long)]
    start: Option<String>,
    /// Only include logs on or before this date (YYYY-MM-DD)
    #[arg(long)]
    end: Option<String>,
    /// Only include logs from this department
    #[arg(long)]
    department: Option<String>,
    /// Only include logs from this employee (exact name)
    #[arg(long)]
    employee: Option<String>,
}

impl FilterOpts {
    fn into_args(self) -> cli::FilterArgs {
        cli::FilterArgs {
            start: self.start,
            end: self.end,
            department: self.department,
            employee: self.employee,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Record a daily submission — reads JSON from a file or stdin
    Submit {
        /// Path to a JSON submission file (stdin when omitted)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Show the executive summary
    Report {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        #[command(flatten)]
        filter: FilterOpts,
    },
    /// Show per-department performance
    Departments {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        #[command(flatten)]
        filter: FilterOpts,
    },
    /// Show the employee leaderboard
    Leaderboard {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        #[command(flatten)]
        filter: FilterOpts,
    },
    /// Show daily task totals over the trailing window
    Trend {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show form-completeness scores
    Quality {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
        #[command(flatten)]
        filter: FilterOpts,
    },
    /// Export logs as CSV
    Export {
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
        #[command(flatten)]
        filter: FilterOpts,
    },
    /// Show or generate the AI narrative analysis
    Insight {
        /// Discard the cached analysis and generate a fresh one
        #[arg(long)]
        regenerate: bool,
    },
    /// Start the web dashboard
    Web {
        /// Listen address (default from config, 127.0.0.1:9214)
        #[arg(long)]
        addr: Option<String>,
    },
    /// Check system health: log store, config, insight API key
    Health,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective merged configuration
    Show,
    /// Create a default config file at ~/.tally/config.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Set a single value, e.g. `tally config set general.trend_days 14`
    Set { key: String, value: String },
    /// Reset the config file to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Submit { file } => cli::run_submit(file),
        Commands::Report { format, filter } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_report(fmt, &filter.into_args())
        }
        Commands::Departments { format, filter } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_departments(fmt, &filter.into_args())
        }
        Commands::Leaderboard { format, filter } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_leaderboard(fmt, &filter.into_args())
        }
        Commands::Trend { format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_trend(fmt)
        }
        Commands::Quality { format, filter } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_quality(fmt, &filter.into_args())
        }
        Commands::Export { output, filter } => cli::run_export(&filter.into_args(), output),
        Commands::Insight { regenerate } => cli::run_insight(regenerate),
        Commands::Web { addr } => {
            let addr = addr.unwrap_or_else(|| config::load().web.addr);
            web::serve(&addr)
        }
        Commands::Health => cli::run_health(),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
