use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;

use super::index::SparqlResults;

const DEFAULT_ENDPOINT: &str = "https://query.wikidata.org/sparql";

/// Configuration for the SPARQL endpoint client
#[derive(Debug, Clone)]
pub struct KnowledgeBaseConfig {
    /// Endpoint URL (from LIDO_SPARQL_ENDPOINT env var)
    pub endpoint: String,
    /// User agent sent with every query
    pub user_agent: String,
}

impl KnowledgeBaseConfig {
    /// Create config from environment variables, falling back to Wikidata
    pub fn from_env() -> Self {
        let endpoint = std::env::var("LIDO_SPARQL_ENDPOINT")
            .ok()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        Self::new(endpoint)
    }

    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            user_agent: format!("lido-artwork/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for KnowledgeBaseConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

/// Read-only SPARQL client
pub struct SparqlClient {
    client: Client,
    config: KnowledgeBaseConfig,
}

impl SparqlClient {
    pub fn new(config: KnowledgeBaseConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, config })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Run a SELECT query and parse the JSON result set
    pub async fn select(&self, query: &str) -> Result<SparqlResults> {
        debug!("Querying {}", self.config.endpoint);

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[("query", query)])
            .header("Accept", "application/sparql-results+json")
            .send()
            .await
            .context("Failed to send request to SPARQL endpoint")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("SPARQL endpoint error: {} - {}", status, body);
        }

        response
            .json()
            .await
            .context("Failed to parse SPARQL response")
    }
}
