//! Search provider client (SerpApi), used by the data-extraction flow.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One organic search hit, in provider order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub position: u32,
    pub title: String,
    pub link: String,
    pub snippet: String,
}

/// Capability interface over the external search service.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, Error>;
}

/// Configuration for the SerpApi client. The environment is read once at
/// construction, never ambiently mid-call.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    pub api_key: String,
    /// Base URL (default: https://serpapi.com)
    pub base_url: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://serpapi.com".to_string(),
        }
    }
}

impl SearchConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Read the API key from `SERPAPI_API_KEY`. The absence of the key is a
    /// fatal configuration error for the extraction flow, and the message is
    /// surfaced verbatim to the caller.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var("SERPAPI_API_KEY").map_err(|_| {
            Error::Configuration("SERPAPI_API_KEY environment variable is not set.".to_string())
        })?;
        Ok(Self::new(api_key))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<SearchHit>,
}

/// SerpApi implementation of [`SearchProvider`].
#[derive(Clone)]
pub struct SerpApiClient {
    client: reqwest::Client,
    config: SearchConfig,
}

impl SerpApiClient {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl SearchProvider for SerpApiClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, Error> {
        if self.config.api_key.is_empty() {
            return Err(Error::Configuration(
                "SERPAPI_API_KEY environment variable is not set.".to_string(),
            ));
        }

        let url = format!("{}/search.json", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("engine", "google"),
                ("q", query),
                ("api_key", &self.config.api_key),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Backend(format!("HTTP {}: {}", status, error_text)));
        }

        // A reply without organic results is a legitimate empty result.
        let parsed: SerpApiResponse = response.json().await?;
        Ok(parsed.organic_results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_organic_results_is_empty_not_error() {
        let parsed: SerpApiResponse =
            serde_json::from_str("{\"search_metadata\": {\"status\": \"Success\"}}").unwrap();
        assert!(parsed.organic_results.is_empty());
    }

    #[test]
    fn test_hit_deserialization() {
        let parsed: SerpApiResponse = serde_json::from_str(
            "{\"organic_results\": [{\"position\": 1, \"title\": \"Kerala Tourism\", \
             \"link\": \"https://www.keralatourism.org\", \"snippet\": \"God's own country.\"}]}",
        )
        .unwrap();
        assert_eq!(parsed.organic_results.len(), 1);
        assert_eq!(parsed.organic_results[0].position, 1);
    }

    #[tokio::test]
    async fn test_empty_key_is_a_configuration_error() {
        let client = SerpApiClient::new(SearchConfig::default());
        let err = client.search("kerala").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "SERPAPI_API_KEY environment variable is not set."
        );
    }
}
