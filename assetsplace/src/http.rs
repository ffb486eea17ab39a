//! HTTP client abstraction for testability
//!
//! Both the catalog fetcher and the asset downloader talk to the network
//! through [`HttpClient`], so tests can swap in an in-memory client.

use std::io::Read;
use std::time::Duration;

use tracing::debug;

use crate::error::{AssetError, AssetResult};

/// Default timeout for HTTP requests in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A readable response body.
pub type ResponseBody = Box<dyn Read + Send>;

/// Trait for HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request and returns the body as a stream.
    ///
    /// Fails with a network error if the host is unreachable, the request
    /// times out, or the response status is not a success.
    fn open(&self, url: &str) -> AssetResult<ResponseBody>;

    /// Performs an HTTP GET request and returns the full body.
    fn get(&self, url: &str) -> AssetResult<Vec<u8>> {
        let mut body = self.open(url)?;
        let mut bytes = Vec::new();
        body.read_to_end(&mut bytes)
            .map_err(|e| AssetError::Network {
                url: url.to_string(),
                reason: format!("failed to read response: {}", e),
            })?;
        Ok(bytes)
    }
}

/// Real HTTP client implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with the default timeout.
    pub fn new() -> AssetResult<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new ReqwestClient with custom timeout.
    pub fn with_timeout(timeout: Duration) -> AssetResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("assetsplace/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AssetError::InvalidConfig(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    /// The timeout applied to every request.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn request_error(&self, url: &str, e: reqwest::Error) -> AssetError {
        if e.is_timeout() {
            AssetError::Timeout {
                url: url.to_string(),
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            AssetError::Network {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    }
}

impl HttpClient for ReqwestClient {
    fn open(&self, url: &str) -> AssetResult<ResponseBody> {
        debug!(url = %url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| self.request_error(url, e))?;

        // Check HTTP status
        let status = response.status();
        if !status.is_success() {
            return Err(AssetError::Network {
                url: url.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        Ok(Box::new(response))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Mock HTTP client serving fixed bodies keyed by URL.
    ///
    /// Unknown URLs fail with a network error, as an unreachable host would.
    #[derive(Default)]
    pub struct MockHttpClient {
        responses: Mutex<HashMap<String, Vec<u8>>>,
        requests: AtomicUsize,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_response(self, url: &str, body: &[u8]) -> Self {
            self.set_response(url, body);
            self
        }

        pub fn set_response(&self, url: &str, body: &[u8]) {
            self.responses
                .lock()
                .unwrap()
                .insert(url.to_string(), body.to_vec());
        }

        pub fn remove_response(&self, url: &str) {
            self.responses.lock().unwrap().remove(url);
        }

        pub fn request_count(&self) -> usize {
            self.requests.load(Ordering::SeqCst)
        }
    }

    impl HttpClient for MockHttpClient {
        fn open(&self, url: &str) -> AssetResult<ResponseBody> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            match self.responses.lock().unwrap().get(url) {
                Some(body) => Ok(Box::new(Cursor::new(body.clone()))),
                None => Err(AssetError::Network {
                    url: url.to_string(),
                    reason: "HTTP 404 Not Found".to_string(),
                }),
            }
        }
    }

    #[test]
    fn test_mock_client_success() {
        let mock = MockHttpClient::new().with_response("http://example.com", &[1, 2, 3, 4]);

        let result = mock.get("http://example.com");
        assert_eq!(result.unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(mock.request_count(), 1);
    }

    #[test]
    fn test_mock_client_error() {
        let mock = MockHttpClient::new();

        let result = mock.get("http://example.com");
        assert!(result.unwrap_err().is_network());
    }

    #[test]
    fn test_reqwest_client_timeout() {
        let client = ReqwestClient::with_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(5));

        let client = ReqwestClient::new().unwrap();
        assert_eq!(client.timeout().as_secs(), DEFAULT_TIMEOUT_SECS);
    }
}
