//! TMDB metadata client
//!
//! Wraps the two TMDB v3 endpoints the pipeline needs: search-by-title and
//! get-by-id. Empty result sets and non-2xx responses are "not found", never
//! hard failures; transport errors bubble up so the caller can retry on a
//! later run.

use crate::config::TmdbConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Details returned for a matched movie. Missing optional fields default to
/// revenue 0 and an empty genre list.
#[derive(Debug, Clone, Default)]
pub struct MovieDetails {
    pub tmdb_id: i64,
    pub genres: Vec<String>,
    pub release_date: Option<String>,
    pub revenue: i64,
    pub overview: Option<String>,
}

/// Trait for metadata providers
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Search by title and return the first match's id, if any
    async fn search(&self, title: &str) -> Result<Option<i64>>;

    /// Fetch details for a previously found id
    async fn details(&self, tmdb_id: i64) -> Result<Option<MovieDetails>>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    id: i64,
    #[serde(default)]
    genres: Vec<GenreEntry>,
    release_date: Option<String>,
    #[serde(default)]
    revenue: i64,
    overview: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenreEntry {
    name: String,
}

/// TMDB API client
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    /// Create a client from config. The API key is read once from the
    /// configured environment variable; there is no global.
    pub fn new(config: &TmdbConfig) -> Result<Self> {
        let api_key = config.api_key()?;
        Self::with_api_key(config, api_key)
    }

    /// Create a client with an explicit API key
    pub fn with_api_key(config: &TmdbConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|e| Error::Metadata(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl MetadataSource for TmdbClient {
    async fn search(&self, title: &str) -> Result<Option<i64>> {
        let url = format!("{}/search/movie", self.base_url);
        debug!("Searching TMDB for: {}", title);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("query", title)])
            .send()
            .await?;

        if !response.status().is_success() {
            debug!("TMDB search returned {}", response.status());
            return Ok(None);
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.results.first().map(|r| r.id))
    }

    async fn details(&self, tmdb_id: i64) -> Result<Option<MovieDetails>> {
        let url = format!("{}/movie/{}", self.base_url, tmdb_id);
        debug!("Fetching TMDB details for id {}", tmdb_id);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            debug!("TMDB details returned {}", response.status());
            return Ok(None);
        }

        let body: DetailsResponse = response.json().await?;
        Ok(Some(MovieDetails {
            tmdb_id: body.id,
            genres: body.genres.into_iter().map(|g| g.name).collect(),
            release_date: body.release_date.filter(|d| !d.is_empty()),
            revenue: body.revenue,
            overview: body.overview.filter(|o| !o.is_empty()),
        }))
    }
}
