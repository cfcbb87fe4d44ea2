// src/ingest/config.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ingest::types::Source;

const ENV_CONFIG_PATH: &str = "INGEST_CONFIG_PATH";
const ENV_SOURCES_PATH: &str = "SOURCES_CONFIG_PATH";

const DEFAULT_CONFIG_PATH: &str = "config/ingest.toml";
const DEFAULT_SOURCES_PATH: &str = "config/sources.toml";

/// Runtime knobs of the ingestion pipeline. Everything has a default; a
/// config file only needs the keys it wants to change.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Upper bound on entries taken from one feed per fetch.
    pub max_entries_per_feed: usize,
    /// Per-request feed fetch timeout.
    pub fetch_timeout_secs: u64,
    /// Scheduler tick interval.
    pub interval_secs: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_entries_per_feed: 50,
            fetch_timeout_secs: 10,
            interval_secs: 1800,
        }
    }
}

impl IngestConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading ingest config from {}", path.display()))?;
        toml::from_str(&content).context("parsing ingest config")
    }

    /// Load using env var + fallbacks:
    /// 1) $INGEST_CONFIG_PATH
    /// 2) config/ingest.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::from_path(&pb);
            }
            return Err(anyhow!("INGEST_CONFIG_PATH points to non-existent path"));
        }
        let default = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default.exists() {
            return Self::from_path(&default);
        }
        Ok(Self::default())
    }
}

#[derive(Debug, Deserialize)]
struct SourcesFile {
    #[serde(default, rename = "source")]
    sources: Vec<Source>,
}

/// Load the source list from an explicit path. Supports TOML
/// (`[[source]]` tables) or a JSON array. Sources without an id get one
/// from their position; blank names are rejected.
pub fn load_sources_from(path: &Path) -> Result<Vec<Source>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading sources from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let mut sources = if ext == "json" {
        serde_json::from_str::<Vec<Source>>(&content).context("parsing sources json")?
    } else {
        toml::from_str::<SourcesFile>(&content)
            .context("parsing sources file")?
            .sources
    };
    for (idx, source) in sources.iter_mut().enumerate() {
        if source.name.trim().is_empty() {
            return Err(anyhow!("source #{} has an empty name", idx + 1));
        }
        if source.id == 0 {
            source.id = idx as i64 + 1;
        }
    }
    Ok(sources)
}

/// Load sources using env var + fallback:
/// 1) $SOURCES_CONFIG_PATH
/// 2) config/sources.toml
/// 3) empty list
pub fn load_sources_default() -> Result<Vec<Source>> {
    if let Ok(p) = std::env::var(ENV_SOURCES_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_sources_from(&pb);
        }
        return Err(anyhow!("SOURCES_CONFIG_PATH points to non-existent path"));
    }
    let default = PathBuf::from(DEFAULT_SOURCES_PATH);
    if default.exists() {
        return load_sources_from(&default);
    }
    Ok(Vec::new())
}
