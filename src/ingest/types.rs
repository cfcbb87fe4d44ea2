// src/ingest/types.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A configured feed provider. Created administratively, read-only to the
/// ingestion pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub feed_url: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Static editorial rating, -10 (left) to 10 (right).
    #[serde(default)]
    pub bias_rating: i32,
    /// Static reliability rating, 0 to 10.
    #[serde(default = "default_reliability")]
    pub reliability_rating: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_reliability() -> i32 {
    5
}

fn default_true() -> bool {
    true
}

impl Source {
    /// Sources the orchestrator fans out over: active, with a feed URL.
    pub fn is_ingestible(&self) -> bool {
        self.is_active && self.feed_url.as_deref().is_some_and(|u| !u.is_empty())
    }
}

/// A media enclosure attached to a feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enclosure {
    pub url: String,
    pub mime: Option<String>,
}

/// One item of a fetched feed document, before normalization. Ephemeral.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    /// URLs from `media:content` elements, in document order.
    pub media_content: Vec<String>,
    /// Enclosures, in document order.
    pub enclosures: Vec<Enclosure>,
}

/// The value object handed to the store for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleCreate {
    pub title: String,
    pub summary: Option<String>,
    /// Globally unique; the dedup key.
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub image_url: Option<String>,
    pub category: String,
    /// Heuristic lean in [-100, 100].
    pub bias_score: f64,
    pub source_id: i64,
}

/// A persisted article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub summary: Option<String>,
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub image_url: Option<String>,
    pub category: String,
    pub bias_score: f64,
    pub source_id: i64,
}

/// Transient classification output, computed purely from text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub category: String,
    pub bias_score: f64,
}

/// Classify an article's text: topic category plus bias score.
pub fn classify(title: &str, summary: &str) -> ClassificationResult {
    ClassificationResult {
        category: crate::classify::categorize(title, summary).to_string(),
        bias_score: crate::bias::score(title, summary),
    }
}

/// Per-source outcome of one ingestion pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SourceReport {
    pub source_id: i64,
    pub source_name: String,
    /// Entries yielded by the parser (after the per-feed cap).
    pub fetched: usize,
    pub persisted: usize,
    pub duplicates: usize,
    pub skipped: usize,
    /// Feed-level failure, when the fetch or parse never produced entries.
    pub error: Option<String>,
}

impl SourceReport {
    pub fn for_source(source: &Source) -> Self {
        Self {
            source_id: source.id,
            source_name: source.name.clone(),
            ..Self::default()
        }
    }
}

/// Aggregate outcome of one full ingestion run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestSummary {
    pub sources_processed: usize,
    pub sources_failed: usize,
    pub persisted: usize,
    pub duplicates: usize,
    pub skipped: usize,
}

impl IngestSummary {
    pub fn absorb(&mut self, report: &SourceReport) {
        self.sources_processed += 1;
        if report.error.is_some() {
            self.sources_failed += 1;
        }
        self.persisted += report.persisted;
        self.duplicates += report.duplicates;
        self.skipped += report.skipped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingestible_requires_active_and_feed_url() {
        let mut s = Source {
            id: 1,
            name: "Example".into(),
            url: "https://example.test".into(),
            feed_url: Some("https://example.test/rss".into()),
            logo_url: None,
            bias_rating: 0,
            reliability_rating: 5,
            is_active: true,
        };
        assert!(s.is_ingestible());

        s.is_active = false;
        assert!(!s.is_ingestible());

        s.is_active = true;
        s.feed_url = Some(String::new());
        assert!(!s.is_ingestible());

        s.feed_url = None;
        assert!(!s.is_ingestible());
    }

    #[test]
    fn summary_absorbs_reports() {
        let mut summary = IngestSummary::default();
        summary.absorb(&SourceReport {
            persisted: 3,
            duplicates: 1,
            ..SourceReport::default()
        });
        summary.absorb(&SourceReport {
            error: Some("timed out".into()),
            ..SourceReport::default()
        });
        assert_eq!(summary.sources_processed, 2);
        assert_eq!(summary.sources_failed, 1);
        assert_eq!(summary.persisted, 3);
        assert_eq!(summary.duplicates, 1);
    }

    #[test]
    fn classify_combines_category_and_score() {
        let r = classify("BJP announces tax cuts for business friendly reforms", "");
        assert_eq!(r.bias_score, 100.0);
        assert!(!r.category.is_empty());
    }
}
