use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

use crate::config::{Config, DEFAULT_API_URL, DEFAULT_USER_AGENT};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("search endpoint answered with status {0}")]
    Status(StatusCode),
}

/// Fetches the raw search response for a query. Implementations do no
/// parsing and no retries.
#[async_trait]
pub trait SearchGateway: Send + Sync {
    async fn fetch(&self, query: &str) -> Result<String, GatewayError>;
}

/// Immutable settings for talking to the MediaWiki API.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub endpoint: String,
    /// `name/version (contact)`, sent as the `User-Agent` header.
    pub user_agent: String,
    pub timeout: Duration,
    pub result_limit: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            endpoint: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
            result_limit: 5,
        }
    }
}

impl From<&Config> for GatewayConfig {
    fn from(config: &Config) -> Self {
        GatewayConfig {
            endpoint: config.api_url.clone(),
            user_agent: config.user_agent.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            result_limit: config.result_limit,
        }
    }
}

/// Build the generator=search request URL. The parameter list is written out
/// by hand and only the query is percent-encoded, so characters like `|` or
/// `&` in the query can't leak into the other parameters.
pub fn build_search_url(config: &GatewayConfig, query: &str) -> String {
    format!(
        "{}?action=query\
         &format=json\
         &prop=extracts%7Cpageimages%7Cinfo\
         &inprop=url\
         &exintro=1\
         &explaintext=1\
         &generator=search\
         &gsrsearch={}\
         &gsrnamespace=0\
         &gsrlimit={}\
         &redirects=1",
        config.endpoint,
        urlencoding::encode(query),
        config.result_limit,
    )
}

pub struct WikipediaGateway {
    client: Client,
    config: GatewayConfig,
}

impl WikipediaGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(GatewayError::Client)?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl SearchGateway for WikipediaGateway {
    async fn fetch(&self, query: &str) -> Result<String, GatewayError> {
        let url = build_search_url(&self.config, query);
        tracing::debug!(query, %url, "fetching search results");

        let request_failed = |source| GatewayError::Request {
            endpoint: self.config.endpoint.clone(),
            source,
        };
        let res = self.client.get(&url).send().await.map_err(request_failed)?;
        let status = res.status();
        if !status.is_success() {
            tracing::warn!(query, %status, "search endpoint returned an error status");
            return Err(GatewayError::Status(status));
        }
        let body = res.text().await.map_err(request_failed)?;
        tracing::debug!(query, bytes = body.len(), "received search response");
        Ok(body)
    }
}
