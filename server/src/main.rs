use anyhow::Result;
use axum::Router;
use clap::Parser;
use feedsearch_core::ScoringConfig;
use feedsearch_server::build_app;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Index artifact path (.json or .bin)
    #[arg(long, default_value = "./public/search.json")]
    index: PathBuf,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Score with postings only, without title and feed-title substring bonuses
    #[arg(long, default_value_t = false)]
    no_title_matching: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let mut scoring = ScoringConfig::default();
    if args.no_title_matching {
        scoring = scoring.without_title_matching();
    }
    let app: Router = build_app(args.index.clone(), scoring)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
