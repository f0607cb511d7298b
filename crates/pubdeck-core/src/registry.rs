//! Package search against the pub.dev registry.

use serde::Deserialize;
use thiserror::Error;

/// Default search endpoint.
pub const SEARCH_URL: &str = "https://pub.dev/api/search";

/// Errors that can occur during registry operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// The registry answered with something other than search results.
    #[error("unexpected search response: {0}")]
    Json(String),
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    packages: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    package: String,
}

/// Client for querying the registry's search API.
pub struct RegistryClient {
    http_client: reqwest::blocking::Client,
    search_url: String,
}

impl RegistryClient {
    /// Create a client against the default registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_search_url(SEARCH_URL)
    }

    /// Create a client against a specific search endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_search_url(url: impl Into<String>) -> Result<Self, RegistryError> {
        let http_client = reqwest::blocking::Client::builder()
            .user_agent(concat!("pubdeck/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| RegistryError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            search_url: url.into(),
        })
    }

    /// Return package-name suggestions for a query, best match first.
    ///
    /// # Errors
    ///
    /// Returns an error on a failed request or an unexpected response body.
    pub fn search(&self, query: &str) -> Result<Vec<String>, RegistryError> {
        let response = self
            .http_client
            .get(&self.search_url)
            .query(&[("q", query)])
            .send()
            .map_err(|e| RegistryError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RegistryError::Network(format!(
                "search returned {}",
                response.status()
            )));
        }

        let body: SearchResponse = response
            .json()
            .map_err(|e| RegistryError::Json(e.to_string()))?;

        Ok(body.packages.into_iter().map(|hit| hit.package).collect())
    }
}
