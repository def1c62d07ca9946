//! rbstyle CLI tool.
//!
//! Usage:
//! ```bash
//! rbstyle check [OPTIONS] [PATHS]...
//! rbstyle list-rules
//! rbstyle init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use rbstyle_core::{ReportFormat, EXIT_FAULT};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Style linter for Ruby projects
#[derive(Parser)]
#[command(name = "rbstyle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "RBSTYLE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run lint checks
    Check {
        /// Files or directories to analyze (default: current directory)
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
            OutputFormat::Compact => Self::Compact,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(u8::try_from(EXIT_FAULT).unwrap_or(2))
        }
    }
}

/// `RUST_LOG` wins; otherwise `--verbose` selects debug. Logs go to stderr.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { "warn" })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Check {
            paths,
            format,
            rules,
            exclude,
            no_color,
        } => {
            let args = commands::check::CheckArgs {
                paths,
                format,
                rules,
                exclude,
                no_color,
            };
            commands::check::run(args, cli.config.as_deref()).await
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(0)
        }
        Commands::Init { force } => {
            commands::init::run(force)?;
            Ok(0)
        }
    }
}
