use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use quote_cli::{AppConfig, Session, logging, run};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Service pricing calculator.
///
/// Walks through existing services, new services, and home internet, then
/// shows the itemized monthly bill with multi-service discounts applied.
#[derive(Debug, Parser)]
#[command(name = "service-quote", version, about)]
struct Cli {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter (e.g. `debug`); overrides the config file.
    #[arg(long)]
    log_level: Option<String>,

    /// Append logs to this file; overrides the config file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Read commands from a file instead of stdin, echoing each one.
    #[arg(long)]
    script: Option<PathBuf>,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(path) = cli.log_file {
        config.log_file = Some(path);
    }

    logging::init_logging(&config.log_level, config.log_file.as_deref())?;
    debug!(?config, "configuration loaded");

    let mut session = Session::new(&config);
    let stdout = io::stdout().lock();

    match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script: {}", path.display()))?;
            run(&mut session, BufReader::new(file), stdout, true)?;
        }
        None => {
            run(&mut session, io::stdin().lock(), stdout, false)?;
        }
    }

    Ok(())
}
