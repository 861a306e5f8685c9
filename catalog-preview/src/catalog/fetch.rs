//! The HTTP capability used to retrieve the catalog.
//!
//! Pipelines only depend on [`CatalogFetcher`], so the transport can be
//! swapped for a scripted one in tests. The reqwest-backed [`HttpFetcher`]
//! is available with the `http` feature.

use async_trait::async_trait;
use serde_json::Value;
#[cfg(feature = "http")]
use std::time::Instant;

use super::models::{records_from_value, CatalogRecord};
use crate::errors::CatalogError;

/// A response received from the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Response body as text.
    pub body: String,
}

impl FetchResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    /// Creates a 200 response with a JSON body.
    #[must_use]
    pub fn ok_json(value: &Value) -> Self {
        Self::new(200, value.to_string())
    }

    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Fails with [`CatalogError::Network`] for non-2xx statuses.
    pub fn error_for_status(self) -> Result<Self, CatalogError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(CatalogError::network(self.status_code))
        }
    }

    /// Decodes the body as JSON.
    pub fn json(&self) -> Result<Value, CatalogError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Decodes the body into catalog records.
    ///
    /// Undecodable bodies and non-array JSON both yield an empty list.
    #[must_use]
    pub fn records_or_empty(&self) -> Vec<CatalogRecord> {
        match self.json() {
            Ok(value) => records_from_value(&value),
            Err(err) => {
                tracing::debug!(error = %err, "Catalog body did not decode, treating as empty");
                Vec::new()
            }
        }
    }
}

/// Protocol for fetching the catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogFetcher: Send + Sync {
    /// Issues a GET request and returns the response, whatever its status.
    ///
    /// Errors are reserved for requests that produced no response at all.
    async fn fetch(&self, url: &str) -> Result<FetchResponse, CatalogError>;
}

/// A [`CatalogFetcher`] backed by reqwest.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    /// Creates a fetcher whose requests carry no extra headers.
    pub fn new() -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client })
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl CatalogFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, CatalogError> {
        let start = Instant::now();
        let response = self.client.get(url).send().await?;
        let status_code = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(
            url = %url,
            status_code,
            bytes = body.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Fetched catalog"
        );

        Ok(FetchResponse { status_code, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_success() {
        assert!(FetchResponse::new(200, "").is_success());
        assert!(FetchResponse::new(204, "").is_success());
        assert!(!FetchResponse::new(301, "").is_success());
        assert!(!FetchResponse::new(404, "").is_success());
        assert!(!FetchResponse::new(500, "").is_success());
    }

    #[test]
    fn test_error_for_status() {
        let err = FetchResponse::new(503, "down").error_for_status().unwrap_err();
        assert_eq!(err, CatalogError::network(503));
        assert!(FetchResponse::new(200, "[]").error_for_status().is_ok());
    }

    #[test]
    fn test_records_or_empty() {
        let response = FetchResponse::ok_json(&json!([{"fields": {"name": "A"}}]));
        assert_eq!(response.records_or_empty().len(), 1);

        assert!(FetchResponse::new(200, "<html>").records_or_empty().is_empty());
        assert!(FetchResponse::new(200, r#"{"a": 1}"#).records_or_empty().is_empty());
    }

    #[tokio::test]
    async fn test_mock_fetcher() {
        let mut mock = MockCatalogFetcher::new();
        mock.expect_fetch()
            .withf(|url| url == "http://catalog.test")
            .times(1)
            .returning(|_| Ok(FetchResponse::new(200, "[]")));

        let response = mock.fetch("http://catalog.test").await.unwrap();
        assert_eq!(response.status_code, 200);
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_http_fetcher_sends_plain_get() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 2\r\nconnection: close\r\n\r\n[]")
                .await
                .unwrap();
            String::from_utf8_lossy(&request).to_lowercase()
        });

        let fetcher = HttpFetcher::new().unwrap();
        let response = fetcher.fetch(&format!("http://{addr}/products")).await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(response.status_code, 200);
        assert!(request.starts_with("get /products http/1.1"));
        assert!(!request.contains("user-agent"));
        assert!(!request.contains("authorization"));
    }
}
