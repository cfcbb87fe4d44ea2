// src/ingest/scheduler.rs
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::ingest::config::IngestConfig;
use crate::ingest::feed::FeedFetcher;
use crate::ingest::store::ArticleStore;

/// Spawn a background loop that runs one ingestion pass per interval tick.
/// A failed run is logged; the loop never stops on its own.
pub fn spawn_scheduler(
    store: Arc<dyn ArticleStore>,
    fetcher: Arc<dyn FeedFetcher>,
    cfg: IngestConfig,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(cfg.interval_secs));
        loop {
            ticker.tick().await;
            match crate::ingest::run_once(Arc::clone(&store), Arc::clone(&fetcher), &cfg).await {
                Ok(summary) => {
                    tracing::info!(
                        target: "ingest",
                        sources = summary.sources_processed,
                        failed = summary.sources_failed,
                        persisted = summary.persisted,
                        duplicates = summary.duplicates,
                        skipped = summary.skipped,
                        "ingestion tick"
                    );
                }
                Err(e) => {
                    tracing::error!(target: "ingest", error = ?e, "ingestion run failed");
                }
            }
        }
    })
}
