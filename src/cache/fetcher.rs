//! Fetcher Module
//!
//! The expensive operation wrapped by the read-through cache.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{CacheError, Result};

// == Fetcher ==
/// Retrieves the resource addressed by `input`.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn retrieve(&self, input: &str) -> Result<String>;
}

// == HTTP Fetcher ==
/// Fetches pages with an HTTP GET and returns the body as text.
///
/// Any response the server sends back is a successful retrieval, whatever
/// its status code. Only transport failures are errors. Timeouts are those
/// of the underlying client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a default client.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("page_cache/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CacheError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client))
    }

    /// Creates a fetcher around an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn retrieve(&self, input: &str) -> Result<String> {
        let response = self.client.get(input).send().await?;
        debug!("GET {} -> {}", input, response.status());
        Ok(response.text().await?)
    }
}

// == Stub Fetcher ==
/// In-process fetcher with scripted responses and per-input call counts.
///
/// Inputs with nothing scripted fail with `FetchFailed`.
#[derive(Debug, Default)]
pub struct StubFetcher {
    responses: RwLock<HashMap<String, std::result::Result<String, String>>>,
    calls: RwLock<HashMap<String, usize>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent retrievals of `input` return `body`.
    pub async fn set_response(&self, input: &str, body: impl Into<String>) {
        self.responses
            .write()
            .await
            .insert(input.to_string(), Ok(body.into()));
    }

    /// Makes subsequent retrievals of `input` fail with `message`.
    pub async fn set_failure(&self, input: &str, message: impl Into<String>) {
        self.responses
            .write()
            .await
            .insert(input.to_string(), Err(message.into()));
    }

    /// Number of times `input` has been retrieved.
    pub async fn calls(&self, input: &str) -> usize {
        self.calls.read().await.get(input).copied().unwrap_or(0)
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn retrieve(&self, input: &str) -> Result<String> {
        *self.calls.write().await.entry(input.to_string()).or_insert(0) += 1;

        match self.responses.read().await.get(input) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(message)) => Err(CacheError::FetchFailed(message.clone())),
            None => Err(CacheError::FetchFailed(format!(
                "no response scripted for {}",
                input
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_fetcher_scripted_responses() {
        let fetcher = StubFetcher::new();
        fetcher.set_response("a", "A").await;
        fetcher.set_failure("b", "boom").await;

        assert_eq!(fetcher.retrieve("a").await.unwrap(), "A");
        assert!(matches!(
            fetcher.retrieve("b").await,
            Err(CacheError::FetchFailed(msg)) if msg == "boom"
        ));
        assert!(fetcher.retrieve("c").await.is_err());

        assert_eq!(fetcher.calls("a").await, 1);
        assert_eq!(fetcher.calls("b").await, 1);
        assert_eq!(fetcher.calls("never").await, 0);
    }

    #[tokio::test]
    async fn test_http_fetcher_rejects_invalid_url() {
        let fetcher = HttpFetcher::new().unwrap();

        let result = fetcher.retrieve("not-a-url").await;
        assert!(matches!(result, Err(CacheError::FetchFailed(_))));
    }

    #[tokio::test]
    async fn test_http_fetcher_connection_refused() {
        let fetcher = HttpFetcher::new().unwrap();

        // Reserve a free port, then close it
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };

        let result = fetcher.retrieve(&format!("http://{}/", addr)).await;
        assert!(matches!(result, Err(CacheError::FetchFailed(_))));
    }
}
