// src/ingest/mod.rs
//! Ingestion orchestrator: fans out over active sources, normalizes and
//! persists their entries, and isolates failures per entry and per source.

pub mod config;
pub mod feed;
pub mod normalize;
pub mod scheduler;
pub mod store;
pub mod types;

use anyhow::{Context, Result};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::bias;
use crate::ingest::config::IngestConfig;
use crate::ingest::feed::FeedFetcher;
use crate::ingest::normalize::normalize_entry;
use crate::ingest::store::{ArticleStore, StoreError};
use crate::ingest::types::{IngestSummary, Source, SourceReport};

/// One-time metrics registration (so series show up on an exporter).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("ingest_entries_total", "Entries parsed from feeds.");
        describe_counter!("ingest_persisted_total", "Articles persisted.");
        describe_counter!(
            "ingest_duplicates_total",
            "Entries already present in the store."
        );
        describe_counter!("ingest_skipped_total", "Entries skipped on error.");
        describe_counter!("ingest_feed_errors_total", "Feed fetch/parse errors.");
        describe_histogram!("ingest_parse_ms", "Feed parse time in milliseconds.");
        describe_gauge!(
            "ingest_last_run_ts",
            "Unix ts when the ingestion pipeline last ran."
        );
    });
}

/// Run one full ingestion pass over every active source with a feed URL.
///
/// Sources are fetched concurrently, one task each; no source can block or
/// fail another. Fails fast only when the source list itself cannot be read.
pub async fn run_once(
    store: Arc<dyn ArticleStore>,
    fetcher: Arc<dyn FeedFetcher>,
    cfg: &IngestConfig,
) -> Result<IngestSummary> {
    ensure_metrics_described();

    let sources = store
        .get_sources()
        .await
        .context("loading source list")?;
    let eligible: Vec<Source> = sources.into_iter().filter(Source::is_ingestible).collect();

    let mut tasks = JoinSet::new();
    let max_entries = cfg.max_entries_per_feed;
    for source in eligible {
        let store = Arc::clone(&store);
        let fetcher = Arc::clone(&fetcher);
        tasks.spawn(async move { ingest_source(&*store, &*fetcher, &source, max_entries).await });
    }

    let mut summary = IngestSummary::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(report) => summary.absorb(&report),
            Err(e) => {
                tracing::error!(error = ?e, "source task panicked");
                summary.sources_processed += 1;
                summary.sources_failed += 1;
            }
        }
    }

    gauge!("ingest_last_run_ts").set(chrono::Utc::now().timestamp().max(0) as f64);
    Ok(summary)
}

/// Fetch and ingest one source. Never returns an error: feed-level failures
/// are recorded on the report, entry-level failures are counted and the loop
/// moves on.
async fn ingest_source(
    store: &dyn ArticleStore,
    fetcher: &dyn FeedFetcher,
    source: &Source,
    max_entries: usize,
) -> SourceReport {
    let mut report = SourceReport::for_source(source);
    // is_ingestible guarantees the URL is present.
    let feed_url = source.feed_url.as_deref().unwrap_or_default();

    let entries = match fetcher.fetch(feed_url).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(source = %source.name, error = ?e, "feed fetch failed");
            counter!("ingest_feed_errors_total").increment(1);
            report.error = Some(format!("{e:#}"));
            return report;
        }
    };

    let now = chrono::Utc::now();
    // Entries within a source stay sequential to keep the store session
    // coherent; bounded to cap latency on pathological feeds.
    for entry in entries.into_iter().take(max_entries) {
        report.fetched += 1;
        let article = match normalize_entry(&entry, source.id, now) {
            Ok(article) => article,
            Err(e) => {
                tracing::warn!(source = %source.name, error = %e, "entry skipped");
                counter!("ingest_skipped_total").increment(1);
                report.skipped += 1;
                continue;
            }
        };

        let (title, category, score) =
            (article.title.clone(), article.category.clone(), article.bias_score);
        match store.create_article(article).await {
            Ok(_) => {
                tracing::info!(
                    source = %source.name,
                    category = %category,
                    bias = %bias::label(score),
                    title = %title,
                    "article saved"
                );
                counter!("ingest_persisted_total").increment(1);
                report.persisted += 1;
            }
            Err(StoreError::DuplicateUrl(_)) => {
                // Already ingested; expected on every re-run.
                tracing::debug!(source = %source.name, title = %title, "duplicate skipped");
                counter!("ingest_duplicates_total").increment(1);
                report.duplicates += 1;
            }
            Err(e) => {
                tracing::warn!(source = %source.name, title = %title, error = %e, "persist failed");
                counter!("ingest_skipped_total").increment(1);
                report.skipped += 1;
            }
        }
    }

    report
}
