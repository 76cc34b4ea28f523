use std::path::PathBuf;

use clap::Parser;

/// Crawl paginated product listings and export them as JSON.
#[derive(Debug, Parser)]
#[command(name = "listing-crawler", version)]
pub struct Cli {
    /// Search terms to crawl, one independent crawl each. Prompted for when omitted.
    pub categories: Vec<String>,

    /// RON configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Site origin, e.g. https://www.amazon.fr
    #[arg(long)]
    pub origin: Option<String>,

    /// Stop after this many pages per category.
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Directory receiving one JSON file per category.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Also write logs to this file; with `--quiet`, log only to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Only log warnings and errors to the terminal.
    #[arg(long, short)]
    pub quiet: bool,
}
