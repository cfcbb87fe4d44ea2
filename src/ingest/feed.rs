// src/ingest/feed.rs
//! Feed retrieval and entry extraction. RSS 2.0 and Atom documents are
//! deserialized with quick-xml into [`RawEntry`] values; everything beyond
//! field extraction is left to the normalizer.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use metrics::{counter, histogram};
use quick_xml::de::from_str;
use serde::Deserialize;
use std::time::Duration;
use time::{format_description::well_known::Rfc2822, OffsetDateTime};

use crate::ingest::types::{Enclosure, RawEntry};

/// Retrieves one feed URL as a list of raw entries. The only suspension
/// point of the pipeline besides persistence writes.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, feed_url: &str) -> Result<Vec<RawEntry>>;
}

/// HTTP fetcher with a bounded per-request timeout, so one stalled remote
/// cannot stall the whole ingestion run.
pub struct HttpFeedFetcher {
    client: reqwest::Client,
}

impl HttpFeedFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("news-bias-ingest/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, feed_url: &str) -> Result<Vec<RawEntry>> {
        let resp = self
            .client
            .get(feed_url)
            .send()
            .await
            .with_context(|| format!("fetching feed {feed_url}"))?
            .error_for_status()
            .with_context(|| format!("feed {feed_url} returned error status"))?;
        let body = resp.text().await.context("reading feed body")?;
        parse_feed(&body)
    }
}

// --- RSS 2.0 ---

#[derive(Debug, Deserialize)]
struct Rss {
    channel: RssChannel,
}

#[derive(Debug, Deserialize)]
struct RssChannel {
    #[serde(rename = "item", default)]
    items: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct RssItem {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    // quick-xml's serde deserializer strips namespace prefixes, so
    // `<media:content>` arrives as `content`.
    #[serde(rename = "content", default)]
    media_content: Vec<MediaContentElem>,
    #[serde(rename = "enclosure", default)]
    enclosures: Vec<EnclosureElem>,
}

#[derive(Debug, Deserialize)]
struct MediaContentElem {
    #[serde(rename = "@url")]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EnclosureElem {
    #[serde(rename = "@url")]
    url: Option<String>,
    #[serde(rename = "@type")]
    mime: Option<String>,
}

// --- Atom ---

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    title: Option<AtomText>,
    summary: Option<AtomText>,
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
    published: Option<String>,
    updated: Option<String>,
}

// Atom text constructs carry a `type` attribute, so plain String won't do.
#[derive(Debug, Deserialize)]
struct AtomText {
    #[serde(rename = "$text")]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: Option<String>,
    #[serde(rename = "@rel")]
    rel: Option<String>,
    #[serde(rename = "@type")]
    mime: Option<String>,
}

/// Parse a fetched feed document into raw entries. Sniffs RSS vs Atom by
/// root element; anything else is a feed-level parse failure.
pub fn parse_feed(body: &str) -> Result<Vec<RawEntry>> {
    let t0 = std::time::Instant::now();
    let xml = scrub_html_entities_for_xml(body);

    let entries = if looks_like_atom(&xml) {
        parse_atom(&xml)?
    } else {
        parse_rss(&xml)?
    };

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("ingest_parse_ms").record(ms);
    counter!("ingest_entries_total").increment(entries.len() as u64);
    Ok(entries)
}

fn looks_like_atom(xml: &str) -> bool {
    match (xml.find("<feed"), xml.find("<rss")) {
        (Some(feed), Some(rss)) => feed < rss,
        (Some(_), None) => true,
        _ => false,
    }
}

fn parse_rss(xml: &str) -> Result<Vec<RawEntry>> {
    let rss: Rss = from_str(xml).context("parsing rss document")?;
    let entries = rss
        .channel
        .items
        .into_iter()
        .map(|item| RawEntry {
            title: item.title,
            link: item.link,
            summary: item.description,
            published_at: item.pub_date.as_deref().and_then(parse_rfc2822),
            media_content: item
                .media_content
                .into_iter()
                .filter_map(|m| m.url)
                .collect(),
            enclosures: item
                .enclosures
                .into_iter()
                .filter_map(|e| {
                    e.url.map(|url| Enclosure {
                        url,
                        mime: e.mime,
                    })
                })
                .collect(),
        })
        .collect();
    Ok(entries)
}

fn parse_atom(xml: &str) -> Result<Vec<RawEntry>> {
    let feed: AtomFeed = from_str(xml).context("parsing atom document")?;
    let entries = feed
        .entries
        .into_iter()
        .map(|entry| {
            let link = entry
                .links
                .iter()
                .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
                .and_then(|l| l.href.clone());
            let enclosures = entry
                .links
                .into_iter()
                .filter(|l| l.rel.as_deref() == Some("enclosure"))
                .filter_map(|l| {
                    l.href.map(|url| Enclosure {
                        url,
                        mime: l.mime,
                    })
                })
                .collect();
            RawEntry {
                title: entry.title.and_then(|t| t.value),
                link,
                summary: entry.summary.and_then(|t| t.value),
                published_at: entry
                    .published
                    .or(entry.updated)
                    .as_deref()
                    .and_then(parse_rfc3339),
                media_content: Vec::new(),
                enclosures,
            }
        })
        .collect();
    Ok(entries)
}

/// RSS `pubDate` is RFC 2822. A malformed value is not an error; the
/// normalizer falls back to the ingestion timestamp.
fn parse_rfc2822(ts: &str) -> Option<DateTime<Utc>> {
    OffsetDateTime::parse(ts, &Rfc2822)
        .ok()
        .and_then(|dt| Utc.timestamp_opt(dt.unix_timestamp(), 0).single())
}

fn parse_rfc3339(ts: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(ts)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Feeds routinely embed named HTML entities that are invalid XML; replace
/// the common ones before handing the document to the XML parser.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&ndash;", "-")
        .replace("&mdash;", "-")
        .replace("&ldquo;", "\"")
        .replace("&rdquo;", "\"")
        .replace("&lsquo;", "'")
        .replace("&rsquo;", "'")
}
