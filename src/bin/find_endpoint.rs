//! Search the API reference by keywords.
//!
//! Usage:
//!   find-endpoint blocked senders list
//!   find-endpoint --category Gateway --limit 5 emergency contact

use anyhow::bail;
use apiref::catalog::load_catalog;
use apiref::search::{render_result, search, DEFAULT_LIMIT, NO_RESULTS_MESSAGE};
use apiref::{telemetry, SearchConfig};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "find-endpoint", version)]
#[command(about = "Search API endpoints by keywords")]
struct Cli {
    /// Keywords to search for (e.g. blocked senders list).
    #[arg(required = true)]
    query: Vec<String>,
    /// Path to the API reference (overrides APIREF_API_REF).
    #[arg(long)]
    api_ref: Option<PathBuf>,
    /// Only show endpoints in this category (case-insensitive).
    #[arg(long)]
    category: Option<String>,
    /// Number of results to show.
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = SearchConfig::from_env()?;
    telemetry::init(config.log_format);

    let api_ref = cli.api_ref.unwrap_or(config.api_ref_path);
    if !api_ref.exists() {
        bail!("api-reference not found: {}", api_ref.display());
    }

    let catalog = load_catalog(&api_ref)?;
    let results = search(&catalog, cli.query.as_slice(), cli.category.as_deref(), cli.limit);

    if results.is_empty() {
        println!("{}", NO_RESULTS_MESSAGE);
        return Ok(());
    }

    for result in &results {
        println!("{}", render_result(result));
    }

    Ok(())
}
