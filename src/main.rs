use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use piggly::cli::{cmd_report, cmd_summary};
use piggly::config::ReportConfig;
use piggly::profile::ProfileDump;

/// piggly — HTML coverage reports for PostgreSQL stored procedures.
#[derive(Parser)]
#[command(name = "piggly", version, about)]
struct Cli {
    /// Directory to write reports into.
    #[arg(long, global = true, default_value = "piggly/reports")]
    output_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one HTML page per procedure plus an index page.
    Report {
        /// Profile dump (JSON) produced by the profiler.
        #[arg(long)]
        profile: PathBuf,

        /// Only report on these procedures (identifier or name). Repeatable.
        #[arg(long = "procedure")]
        procedures: Vec<String>,

        /// Stylesheet linked from every page.
        #[arg(long, default_value = "piggly.css")]
        stylesheet: String,

        /// Write pages one at a time instead of in parallel.
        #[arg(long)]
        serial: bool,
    },

    /// Print per-procedure coverage as a plain-text table.
    Summary {
        /// Profile dump (JSON) produced by the profiler.
        #[arg(long)]
        profile: PathBuf,
    },
}

fn load(path: &std::path::Path) -> Result<ProfileDump> {
    ProfileDump::load(path).with_context(|| format!("Failed to load profile {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PIGGLY_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Report {
            profile,
            procedures,
            stylesheet,
            serial,
        } => {
            let dump = load(&profile)?;
            let config = ReportConfig {
                stylesheet,
                parallel: !serial,
                ..ReportConfig::new(cli.output_dir)
            };
            cmd_report(&dump, &config, &procedures)?
        }
        Commands::Summary { profile } => cmd_summary(&load(&profile)?)?,
    };

    print!("{output}");
    Ok(())
}
