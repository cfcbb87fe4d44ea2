// src/ingest/store.rs
//! Persistence collaborator seam. The pipeline only needs two operations:
//! list sources and create articles with URL uniqueness enforced.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use crate::ingest::types::{Article, ArticleCreate, Source};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// URL uniqueness violation. Expected and frequent during re-ingestion;
    /// the orchestrator treats it as "already ingested".
    #[error("article url already exists: {0}")]
    DuplicateUrl(String),
    #[error("store backend error: {0}")]
    Backend(String),
}

#[async_trait::async_trait]
pub trait ArticleStore: Send + Sync {
    async fn get_sources(&self) -> Result<Vec<Source>, StoreError>;

    /// Persist a new article. Must fail with [`StoreError::DuplicateUrl`]
    /// when the URL already exists, and must leave no partial state behind
    /// on any failure.
    async fn create_article(&self, article: ArticleCreate) -> Result<Article, StoreError>;
}

/// In-process store keyed by article URL. Used by the binary and by tests;
/// a database-backed implementation satisfies the same contract.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sources: Vec<Source>,
    articles: Mutex<HashMap<String, Article>>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn with_sources(sources: Vec<Source>) -> Self {
        Self {
            sources,
            articles: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn article_count(&self) -> usize {
        self.articles.lock().expect("article map poisoned").len()
    }

    pub fn articles(&self) -> Vec<Article> {
        self.articles
            .lock()
            .expect("article map poisoned")
            .values()
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl ArticleStore for MemoryStore {
    async fn get_sources(&self) -> Result<Vec<Source>, StoreError> {
        Ok(self.sources.clone())
    }

    async fn create_article(&self, article: ArticleCreate) -> Result<Article, StoreError> {
        let mut map = self
            .articles
            .lock()
            .map_err(|_| StoreError::Backend("article map poisoned".into()))?;
        if map.contains_key(&article.url) {
            return Err(StoreError::DuplicateUrl(article.url));
        }
        let stored = Article {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            title: article.title,
            summary: article.summary,
            url: article.url.clone(),
            published_at: article.published_at,
            image_url: article.image_url,
            category: article.category,
            bias_score: article.bias_score,
            source_id: article.source_id,
        };
        map.insert(article.url, stored.clone());
        Ok(stored)
    }
}
