//! HTTP client shared by the remote queries.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Configuration for the query client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            user_agent: format!("rubin-etc/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Errors that can occur during a remote query.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a body that could not be understood.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Single-shot HTTP client for the JPL services.
#[derive(Debug, Clone)]
pub struct QueryClient {
    client: Client,
    config: ClientConfig,
}

impl QueryClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches `url` with optional query parameters.
    ///
    /// Returns `Ok(None)` when the service answers with a non-success status.
    pub(crate) async fn get_text(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Option<String>, FetchError> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, url, "query returned no data");
            return Ok(None);
        }
        tracing::debug!(%status, url = %response.url(), "query succeeded");
        Ok(Some(response.text().await?))
    }
}
