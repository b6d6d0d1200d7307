// crates/network/src/client.rs
//! JSON-over-HTTP client wrapper
//!
//! Every call is attempted exactly once; failures are returned to the caller
//! as-is. Callers that need retries layer them on top.

use crate::error::{NetworkError, NetworkResult};
use reqwest::{Client as ReqwestClient, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Whole-request timeout; `None` waits for the server indefinitely
    pub timeout: Option<Duration>,
    /// User agent string
    pub user_agent: String,
    /// Maximum redirects to follow
    pub max_redirects: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: format!("ReadLog/{}", env!("CARGO_PKG_VERSION")),
            max_redirects: 10,
        }
    }
}

impl ClientConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Thin JSON client over reqwest
#[derive(Clone)]
pub struct Client {
    inner: ReqwestClient,
    config: ClientConfig,
}

impl Client {
    /// Creates a new client with default configuration
    pub fn new() -> NetworkResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> NetworkResult<Self> {
        let mut builder = ReqwestClient::builder()
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects));

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(NetworkError::Http)?;

        Ok(Self {
            inner: client,
            config,
        })
    }

    /// Returns the active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// GET `url` and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> NetworkResult<T> {
        let response = self.send(self.inner.get(check_url(url)?)).await?;
        decode(response).await
    }

    /// POST `body` as JSON and decode the JSON reply
    pub async fn post_json<B, T>(&self, url: &str, body: &B) -> NetworkResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.inner.post(check_url(url)?).json(body)).await?;
        decode(response).await
    }

    /// PUT `body` as JSON, discarding any reply body
    pub async fn put_json<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> NetworkResult<()> {
        self.send(self.inner.put(check_url(url)?).json(body)).await?;
        Ok(())
    }

    /// DELETE `url`, discarding any reply body
    pub async fn delete(&self, url: &str) -> NetworkResult<()> {
        self.send(self.inner.delete(check_url(url)?)).await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder) -> NetworkResult<Response> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        log::debug!("{} answered {}", response.url(), status);
        Err(NetworkError::Status {
            code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        })
    }
}

fn check_url(url: &str) -> NetworkResult<&str> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url)
    } else {
        Err(NetworkError::InvalidUrl(url.to_string()))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> NetworkResult<T> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert!(config.timeout.is_none());
        assert_eq!(config.max_redirects, 10);
        assert!(config.user_agent.starts_with("ReadLog/"));
    }

    #[test]
    fn test_client_creation() {
        assert!(Client::new().is_ok());
    }

    #[test]
    fn test_client_with_timeout() {
        let config = ClientConfig::default().with_timeout(Duration::from_secs(5));
        let client = Client::with_config(config).unwrap();
        assert_eq!(client.config().timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_check_url() {
        assert!(check_url("http://localhost:3001/books").is_ok());
        assert!(check_url("https://example.com").is_ok());
        assert!(matches!(
            check_url("localhost:3001"),
            Err(NetworkError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_url_short_circuits() {
        let client = Client::new().unwrap();
        let result: NetworkResult<serde_json::Value> = client.get_json("ftp://nowhere").await;
        assert!(matches!(result, Err(NetworkError::InvalidUrl(_))));
    }
}
