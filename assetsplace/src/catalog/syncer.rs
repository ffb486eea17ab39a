//! Catalog synchronization by content digest.
//!
//! The remote catalog carries no version or conditional-fetch metadata, so
//! the syncer compares SHA-256 digests of the remote body and the local
//! copy and only rewrites the local file when they differ.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use super::fetcher::CatalogFetcher;
use super::hasher::{catalog_digest, CatalogDigest};
use super::store::CatalogStore;
use crate::error::AssetResult;
use crate::http::HttpClient;

/// Whether a sync changed the local catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Local copy was replaced with the remote body.
    Updated,
    /// Local copy already matched the remote body.
    UpToDate,
}

/// Outcome of a single sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncResult {
    pub status: SyncStatus,
    /// Size of the remote body.
    pub bytes_fetched: usize,
    /// Digest of the remote body.
    pub digest: CatalogDigest,
}

impl SyncResult {
    pub fn is_updated(&self) -> bool {
        self.status == SyncStatus::Updated
    }
}

impl fmt::Display for SyncResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            SyncStatus::Updated => write!(f, "Assetfile updated ({} bytes).", self.bytes_fetched),
            SyncStatus::UpToDate => write!(f, "Assetfile is up to date."),
        }
    }
}

/// Reconciles the local catalog copy with the remote source.
pub struct CatalogSyncer {
    fetcher: CatalogFetcher,
}

impl CatalogSyncer {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self {
            fetcher: CatalogFetcher::new(client),
        }
    }

    /// Fetch `remote_url` and overwrite `local_path` if its content differs.
    ///
    /// A missing local file counts as empty, so the first sync always
    /// writes. At most one write happens per call, and none when the
    /// digests match.
    pub fn sync(&self, remote_url: &str, local_path: &Path) -> AssetResult<SyncResult> {
        let store = CatalogStore::new(local_path);

        let remote = self.fetcher.fetch(remote_url)?;
        let local = store.read()?;

        let remote_digest = catalog_digest(&remote);
        let status = if remote_digest == catalog_digest(&local) {
            SyncStatus::UpToDate
        } else {
            store.write(&remote)?;
            SyncStatus::Updated
        };

        info!(
            url = %remote_url,
            path = %local_path.display(),
            status = ?status,
            bytes = remote.len(),
            digest = %remote_digest,
            "Catalog sync complete"
        );

        Ok(SyncResult {
            status,
            bytes_fetched: remote.len(),
            digest: remote_digest,
        })
    }
}
