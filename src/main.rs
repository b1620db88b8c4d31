mod collector;
mod config;
mod feed;
mod history;
mod parser;

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use collector::Collector;
use config::FeedConfig;
use history::GitHistory;

#[derive(Parser)]
#[command(name = "blog_feed", about = "Generate an RSS feed from the blog posts in this repository")]
struct Cli {
    /// Repository root; git history and public URLs are relative to it
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Directory of markdown posts, relative to the root
    #[arg(long, default_value = config::DEFAULT_DOCS_DIR)]
    docs_dir: PathBuf,

    /// Where the feed is written, relative to the root
    #[arg(long, default_value = config::DEFAULT_OUTPUT_PATH)]
    output: PathBuf,
}

#[derive(Debug)]
struct RunSummary {
    output: PathBuf,
    documents: usize,
    items: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    println!("Generating RSS feed...");
    let summary = run(&cli, &FeedConfig::default(), std::io::stderr().is_terminal())?;
    println!("RSS feed generated: {}", summary.output.display());
    println!("Found {} blog posts", summary.documents);
    info!("{} items written", summary.items);
    Ok(())
}

/// Collect, render and write the feed, overwriting any previous output.
fn run(cli: &Cli, feed_config: &FeedConfig, progress: bool) -> Result<RunSummary> {
    let history = GitHistory::new(&cli.root);
    let records = Collector::new(&cli.root, &cli.docs_dir)
        .with_progress(progress)
        .collect(&history)
        .context("Failed to collect blog posts")?;
    for r in records.iter().filter(|r| r.date.is_none()) {
        debug!("No history date for {}, leaving it out of the feed", r.path.display());
    }

    let now = chrono::Local::now().fixed_offset();
    let xml = feed::render(&records, feed_config, now);

    let output = cli.root.join(&cli.output);
    std::fs::write(&output, xml)
        .with_context(|| format!("Failed to write feed to {}", output.display()))?;

    Ok(RunSummary {
        output,
        documents: records.len(),
        items: records.iter().filter(|r| r.date.is_some()).count(),
    })
}

// ── Tests ──
