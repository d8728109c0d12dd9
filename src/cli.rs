use clap::Parser;
use std::path::PathBuf;

/// `BanShield` - watches a profile for a fresh ban and hands off once.
#[derive(Parser, Debug)]
#[command(name = "banshield")]
#[command(version)]
#[command(about = "Watches a profile for a fresh ban and hands off once.", long_about = None)]
pub struct Cli {
    /// Rehearse the whole pipeline with a simulated ban (same as BANSHIELD_DRY_RUN=1)
    #[arg(long)]
    pub dry_run: bool,

    /// TOML config file (default: ./banshield.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}
