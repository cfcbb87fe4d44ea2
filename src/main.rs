//! Ingestion entrypoint: loads config and the source list, then runs one
//! ingestion pass, or keeps running on an interval when INGEST_LOOP=1.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use news_bias_ingest::ingest::config::{load_sources_default, IngestConfig};
use news_bias_ingest::ingest::scheduler::spawn_scheduler;
use news_bias_ingest::{HttpFeedFetcher, MemoryStore};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = IngestConfig::load_default().context("loading ingest config")?;
    let sources = load_sources_default().context("loading source list")?;
    if sources.is_empty() {
        tracing::warn!("no sources configured; nothing to ingest");
    }

    let store = Arc::new(MemoryStore::with_sources(sources));
    let fetcher = Arc::new(HttpFeedFetcher::new(cfg.fetch_timeout())?);

    let run_loop = std::env::var("INGEST_LOOP").ok().as_deref() == Some("1");
    if run_loop {
        tracing::info!(interval_secs = cfg.interval_secs, "starting scheduler");
        let handle = spawn_scheduler(store, fetcher, cfg);
        handle.await.context("scheduler task ended")?;
        return Ok(());
    }

    let summary = news_bias_ingest::ingest::run_once(store, fetcher, &cfg).await?;
    tracing::info!(
        sources = summary.sources_processed,
        failed = summary.sources_failed,
        persisted = summary.persisted,
        duplicates = summary.duplicates,
        skipped = summary.skipped,
        "ingestion completed"
    );
    Ok(())
}
