// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod bias;
pub mod classify;
pub mod ingest;

// ---- Re-exports for stable public API ----
pub use crate::bias::{label, percentage_breakdown, score, BiasBreakdown, BiasLabel};
pub use crate::classify::categorize;
pub use crate::ingest::config::IngestConfig;
pub use crate::ingest::feed::{FeedFetcher, HttpFeedFetcher};
pub use crate::ingest::store::{ArticleStore, MemoryStore, StoreError};
pub use crate::ingest::types::{
    Article, ArticleCreate, ClassificationResult, IngestSummary, RawEntry, Source, SourceReport,
};
