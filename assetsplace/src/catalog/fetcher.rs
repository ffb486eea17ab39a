//! Remote catalog retrieval.

use std::sync::Arc;

use tracing::debug;

use crate::error::AssetResult;
use crate::http::HttpClient;

/// Fetches raw catalog bytes from a remote source.
#[derive(Clone)]
pub struct CatalogFetcher {
    client: Arc<dyn HttpClient>,
}

impl CatalogFetcher {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self { client }
    }

    /// Fetch the full catalog body.
    ///
    /// Blocks until the body is read or the client's timeout elapses.
    pub fn fetch(&self, url: &str) -> AssetResult<Vec<u8>> {
        let bytes = self.client.get(url)?;
        debug!(url = %url, bytes = bytes.len(), "Fetched remote catalog");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::tests::MockHttpClient;

    #[test]
    fn test_fetch_returns_body() {
        let client = Arc::new(MockHttpClient::new().with_response("http://c/cat.xml", b"<assets/>"));
        let fetcher = CatalogFetcher::new(client);

        assert_eq!(fetcher.fetch("http://c/cat.xml").unwrap(), b"<assets/>");
    }

    #[test]
    fn test_fetch_unreachable_is_network_error() {
        let fetcher = CatalogFetcher::new(Arc::new(MockHttpClient::new()));

        assert!(fetcher.fetch("http://c/cat.xml").unwrap_err().is_network());
    }
}
