use anyhow::Result;
use clap::{Parser, Subcommand};
use feedsearch_core::persist::{load_artifact, save_artifact, IndexArtifact};
use feedsearch_core::{build_index, Feed};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

mod ingest;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build and inspect the feed search index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index artifact from feed JSON/JSONL files or a directory of them
    Build {
        /// Input path (file or directory)
        #[arg(long)]
        input: PathBuf,
        /// Output artifact; `.bin` writes bincode, anything else JSON
        #[arg(long, default_value = "./public/search.json")]
        output: PathBuf,
        /// Rebuild even if the output already exists
        #[arg(long, default_value_t = false)]
        force: bool,
        /// Index feeds as given, without link dedup and HTML flattening
        #[arg(long, default_value_t = false)]
        raw: bool,
    },
    /// Print the metadata of an existing artifact
    Stats {
        #[arg(long, default_value = "./public/search.json")]
        index: PathBuf,
    },
}

fn main() -> Result<()> {
    // stdout carries command output
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, force, raw } => build(&input, &output, force, raw),
        Commands::Stats { index } => stats(&index),
    }
}

fn build(input: &Path, output: &Path, force: bool, raw: bool) -> Result<()> {
    if output.exists() && !force {
        tracing::info!(output = %output.display(), "index artifact exists, skipping build (use --force to rebuild)");
        return Ok(());
    }

    let mut feeds: Vec<Feed> = ingest::read_feeds(input)?;
    if !raw {
        feeds = feeds.into_iter().map(Feed::normalized).collect();
    }
    let num_feeds = feeds.len();
    let num_items: usize = feeds.iter().map(|f| f.items.len()).sum();
    tracing::info!(num_feeds, num_items, "ingested feeds");

    let started = std::time::Instant::now();
    let index = build_index(&feeds);
    tracing::info!(took_ms = started.elapsed().as_millis() as u64, "built search index");

    save_artifact(output, &IndexArtifact::new(index))?;
    tracing::info!(output = %output.display(), "index build complete");
    Ok(())
}

fn stats(index: &Path) -> Result<()> {
    let artifact = load_artifact(index)?;
    let out = serde_json::json!({
        "postCount": artifact.post_count,
        "commonTerms": artifact.index.common_terms.len(),
        "metadata": artifact.index.metadata,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
