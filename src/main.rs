//! packsmith: regenerate the custom item models of a resource pack and zip it.
//!
//! Usage:
//!   # Build with the default settings file
//!   packsmith
//!
//!   # Use another settings file and spreadsheet
//!   packsmith --settings pack.json --spreadsheet sheets/models.xlsx

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use packsmith::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "packsmith")]
#[command(about = "Build a resource pack with custom item models", long_about = None)]
#[command(version)]
struct Args {
    /// Settings file
    #[arg(long, short = 's', default_value = "scripts/builder/settings.json")]
    settings: PathBuf,

    /// Spreadsheet with the custom models (overrides the settings file)
    #[arg(long)]
    spreadsheet: Option<PathBuf>,

    /// Fail instead of replacing existing archives
    #[arg(long)]
    no_overwrite: bool,

    /// Log every row, file and archive entry
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.verbose {
            EnvFilter::new("packsmith=debug")
        } else {
            EnvFilter::new("packsmith=info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut settings = Settings::load(&args.settings)
        .with_context(|| format!("Failed to load settings from {}", args.settings.display()))?;
    if let Some(spreadsheet) = args.spreadsheet {
        settings.spreadsheet = spreadsheet;
    }
    if args.no_overwrite {
        settings.overwrite = false;
    }

    let report = run(&settings).context("Pack build failed")?;

    tracing::info!(
        "Done: {} stale models removed, {} models written, {} archives created",
        report.removed.len(),
        report.models.len(),
        report.archives.len()
    );
    for archive in &report.archives {
        println!("{}", archive.display());
    }

    Ok(())
}
