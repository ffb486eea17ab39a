//! Asset catalog: sync, parse and lookup.
//!
//! The catalog is an XML document published at a fixed URL and mirrored
//! to a local file. The pipeline is:
//!
//! ```text
//! CatalogFetcher ──► CatalogSyncer ──► CatalogStore ──► parse_catalog ──► AssetCatalog
//!  (remote bytes)    (digest compare)   (local file)    (Vec<Asset>)      (lookup)
//! ```
//!
//! An [`AssetCatalog`] is read-only once built. Reloading after a sync
//! builds a new instance.

mod fetcher;
mod hasher;
mod parser;
mod store;
mod syncer;

pub use fetcher::CatalogFetcher;
pub use hasher::{catalog_digest, CatalogDigest};
pub use parser::parse_catalog;
pub use store::CatalogStore;
pub use syncer::{CatalogSyncer, SyncResult, SyncStatus};

use crate::error::{AssetError, AssetResult};

/// One catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Asset {
    /// Display and lookup name, compared case-insensitively.
    pub name: String,
    /// Leaf file name written on disk.
    pub filename: String,
    /// `<namespace>@<category>` routing key, e.g. `minecraft@mod`.
    pub division: String,
    /// Free-form description, may be empty.
    pub description: String,
    /// Source location of the asset's bytes.
    pub url: String,
}

/// Parsed catalog with case-insensitive name lookup.
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    assets: Vec<Asset>,
}

impl AssetCatalog {
    /// Build a catalog from parsed assets, keeping their order.
    pub fn new(assets: Vec<Asset>) -> Self {
        Self { assets }
    }

    /// Parse catalog bytes.
    pub fn from_bytes(bytes: &[u8]) -> AssetResult<Self> {
        parse_catalog(bytes).map(Self::new)
    }

    /// Load the catalog mirrored in `store`.
    ///
    /// Fails if the local file is missing or malformed; an absent local
    /// catalog leaves nothing to serve.
    pub fn load(store: &CatalogStore) -> AssetResult<Self> {
        if !store.exists() {
            return Err(AssetError::ReadFailed {
                path: store.path().to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "local catalog not found",
                ),
            });
        }
        Self::from_bytes(&store.read()?)
    }

    /// Find an asset by name, ignoring case.
    ///
    /// When several entries share a name, the first one in document order
    /// is returned.
    pub fn lookup(&self, name: &str) -> Option<&Asset> {
        let wanted = name.to_lowercase();
        self.assets
            .iter()
            .find(|asset| asset.name.to_lowercase() == wanted)
    }

    /// All assets in document order.
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
