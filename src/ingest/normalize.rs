// src/ingest/normalize.rs
//! Turns a raw feed entry into a persistable article: cleans text, resolves
//! the timestamp and image, and delegates topic/bias classification.

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;

use crate::ingest::types::{ArticleCreate, RawEntry};

/// Entry-level failures. Only an unusable title or link skips an entry;
/// every other missing field has a defined fallback.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    #[error("entry has no title")]
    MissingTitle,
    #[error("entry has no link")]
    MissingLink,
}

/// Clean feed-supplied text for classification and persistence: decode HTML
/// entities, strip tags, collapse whitespace, cap runaway payloads.
pub fn clean_html(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").trim().to_string();

    if out.chars().count() > 2000 {
        out = out.chars().take(2000).collect();
    }
    out
}

/// First media-content URL wins; otherwise the first enclosure whose declared
/// MIME type contains "image".
fn pick_image(entry: &RawEntry) -> Option<String> {
    if let Some(url) = entry.media_content.first() {
        return Some(url.clone());
    }
    entry
        .enclosures
        .iter()
        .find(|e| e.mime.as_deref().is_some_and(|m| m.contains("image")))
        .map(|e| e.url.clone())
}

/// Normalize one entry for persistence. Pure aside from classification;
/// `now` is the ingestion timestamp used when the entry carries none.
pub fn normalize_entry(
    entry: &RawEntry,
    source_id: i64,
    now: DateTime<Utc>,
) -> Result<ArticleCreate, EntryError> {
    let title = entry
        .title
        .as_deref()
        .map(clean_html)
        .filter(|t| !t.is_empty())
        .ok_or(EntryError::MissingTitle)?;
    let url = entry
        .link
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .ok_or(EntryError::MissingLink)?
        .to_string();

    let summary = entry
        .summary
        .as_deref()
        .map(clean_html)
        .filter(|s| !s.is_empty());

    let classification =
        crate::ingest::types::classify(&title, summary.as_deref().unwrap_or_default());

    Ok(ArticleCreate {
        title,
        summary,
        url,
        published_at: entry.published_at.unwrap_or(now),
        image_url: pick_image(entry),
        category: classification.category,
        bias_score: classification.bias_score,
        source_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::types::Enclosure;
    use chrono::TimeZone;

    fn base_entry() -> RawEntry {
        RawEntry {
            title: Some("Parliament passes new policy".into()),
            link: Some("https://example.test/politics/policy".into()),
            summary: Some("<p>The minister said&nbsp;so.</p>".into()),
            published_at: None,
            media_content: Vec::new(),
            enclosures: Vec::new(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn missing_timestamp_falls_back_to_ingestion_time() {
        let article = normalize_entry(&base_entry(), 7, now()).unwrap();
        assert_eq!(article.published_at, now());
        assert_eq!(article.source_id, 7);
    }

    #[test]
    fn present_timestamp_is_kept() {
        let mut entry = base_entry();
        let published = Utc.with_ymd_and_hms(2023, 12, 28, 10, 30, 0).unwrap();
        entry.published_at = Some(published);
        let article = normalize_entry(&entry, 1, now()).unwrap();
        assert_eq!(article.published_at, published);
    }

    #[test]
    fn summary_is_cleaned_of_markup() {
        let article = normalize_entry(&base_entry(), 1, now()).unwrap();
        assert_eq!(article.summary.as_deref(), Some("The minister said so."));
    }

    #[test]
    fn absent_summary_stays_absent() {
        let mut entry = base_entry();
        entry.summary = None;
        let article = normalize_entry(&entry, 1, now()).unwrap();
        assert!(article.summary.is_none());
    }

    #[test]
    fn media_content_wins_over_enclosures() {
        let mut entry = base_entry();
        entry.media_content = vec!["https://example.test/img/a.jpg".into()];
        entry.enclosures = vec![Enclosure {
            url: "https://example.test/img/b.jpg".into(),
            mime: Some("image/jpeg".into()),
        }];
        let article = normalize_entry(&entry, 1, now()).unwrap();
        assert_eq!(
            article.image_url.as_deref(),
            Some("https://example.test/img/a.jpg")
        );
    }

    #[test]
    fn first_image_enclosure_wins_when_no_media_content() {
        let mut entry = base_entry();
        entry.enclosures = vec![
            Enclosure {
                url: "https://example.test/audio.mp3".into(),
                mime: Some("audio/mpeg".into()),
            },
            Enclosure {
                url: "https://example.test/img/b.jpg".into(),
                mime: Some("image/jpeg".into()),
            },
        ];
        let article = normalize_entry(&entry, 1, now()).unwrap();
        assert_eq!(
            article.image_url.as_deref(),
            Some("https://example.test/img/b.jpg")
        );
    }

    #[test]
    fn no_image_source_means_no_image() {
        let article = normalize_entry(&base_entry(), 1, now()).unwrap();
        assert!(article.image_url.is_none());
    }

    #[test]
    fn missing_link_is_an_entry_error() {
        let mut entry = base_entry();
        entry.link = None;
        assert!(matches!(
            normalize_entry(&entry, 1, now()),
            Err(EntryError::MissingLink)
        ));

        entry.link = Some("   ".into());
        assert!(matches!(
            normalize_entry(&entry, 1, now()),
            Err(EntryError::MissingLink)
        ));
    }

    #[test]
    fn missing_title_is_an_entry_error() {
        let mut entry = base_entry();
        entry.title = None;
        assert!(matches!(
            normalize_entry(&entry, 1, now()),
            Err(EntryError::MissingTitle)
        ));
    }

    #[test]
    fn classification_is_attached() {
        let mut entry = base_entry();
        entry.title = Some("BJP announces tax cuts for business friendly reforms".into());
        entry.summary = None;
        let article = normalize_entry(&entry, 1, now()).unwrap();
        assert_eq!(article.bias_score, 100.0);
        assert!(!article.category.is_empty());
    }

    #[test]
    fn clean_html_strips_tags_and_entities() {
        assert_eq!(
            clean_html("<p>Hello&nbsp;&amp; <b>world</b></p>"),
            "Hello & world"
        );
        assert_eq!(clean_html("  spaced\n\nout  "), "spaced out");
    }
}
