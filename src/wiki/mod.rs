//! Wikipedia plot client
//!
//! Resolves a movie title to a plot text using two JSON endpoints: the REST
//! page-summary endpoint for a direct lookup, and the MediaWiki search API
//! as a fallback when the direct lookup misses (searching for
//! "<title> film" to bias toward the movie article).

use crate::config::WikipediaConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Trait for plot text providers
#[async_trait]
pub trait PlotSource: Send + Sync {
    /// Resolve a movie title to plot text, None when no article matches
    async fn plot(&self, title: &str) -> Result<Option<String>>;
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    extract: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchApiResponse {
    #[serde(default)]
    query: SearchQuery,
}

#[derive(Debug, Deserialize, Default)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

/// Wikipedia API client
pub struct WikipediaClient {
    client: Client,
    base_url: String,
    search_limit: u32,
}

impl WikipediaClient {
    /// Create a client from config
    pub fn new(config: &WikipediaConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .build()
            .map_err(|e| Error::Plot(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            search_limit: config.search_limit,
        })
    }

    /// Fetch the summary extract for an article title
    async fn summary(&self, article_title: &str) -> Result<Option<String>> {
        let formatted = article_title.replace(' ', "_");
        let url = format!("{}/api/rest_v1/page/summary/{}", self.base_url, formatted);
        debug!("Fetching Wikipedia summary: {}", article_title);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            debug!("Wikipedia summary returned {}", response.status());
            return Ok(None);
        }

        let body: SummaryResponse = response.json().await?;
        Ok(body.extract.filter(|e| !e.is_empty()))
    }

    /// Search for the best-matching article title
    async fn search(&self, movie_title: &str) -> Result<Option<String>> {
        let url = format!("{}/w/api.php", self.base_url);
        let query = format!("{} film", movie_title);
        debug!("Searching Wikipedia for: {}", query);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query.as_str()),
                ("format", "json"),
                ("srlimit", &self.search_limit.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            debug!("Wikipedia search returned {}", response.status());
            return Ok(None);
        }

        let body: SearchApiResponse = response.json().await?;
        Ok(body.query.search.into_iter().next().map(|hit| hit.title))
    }
}

#[async_trait]
impl PlotSource for WikipediaClient {
    async fn plot(&self, title: &str) -> Result<Option<String>> {
        if let Some(extract) = self.summary(title).await? {
            return Ok(Some(extract));
        }

        // Direct lookup missed; search for the article instead
        let Some(best_match) = self.search(title).await? else {
            return Ok(None);
        };
        self.summary(&best_match).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String) -> WikipediaConfig {
        WikipediaConfig {
            base_url,
            ..WikipediaConfig::default()
        }
    }

    #[tokio::test]
    async fn test_direct_summary_hit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/rest_v1/page/summary/Apollo_13_(film)"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "extract": "Astronauts abort their Moon landing."
            })))
            .mount(&server)
            .await;

        let client = WikipediaClient::new(&test_config(server.uri())).unwrap();
        let plot = client.plot("Apollo 13 (film)").await.unwrap();
        assert_eq!(plot.as_deref(), Some("Astronauts abort their Moon landing."));
    }

    #[tokio::test]
    async fn test_falls_back_to_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/rest_v1/page/summary/Apollo_13"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("srsearch", "Apollo 13 film"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "query": {"search": [{"title": "Apollo 13 (film)"}]}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/rest_v1/page/summary/Apollo_13_(film)"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "extract": "Astronauts abort their Moon landing."
            })))
            .mount(&server)
            .await;

        let client = WikipediaClient::new(&test_config(server.uri())).unwrap();
        let plot = client.plot("Apollo 13").await.unwrap();
        assert_eq!(plot.as_deref(), Some("Astronauts abort their Moon landing."));
    }

    #[tokio::test]
    async fn test_no_match_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/rest_v1/page/summary/No_Such_Movie"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "query": {"search": []}
            })))
            .mount(&server)
            .await;

        let client = WikipediaClient::new(&test_config(server.uri())).unwrap();
        assert_eq!(client.plot("No Such Movie").await.unwrap(), None);
    }
}
