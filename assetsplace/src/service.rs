//! Front-end facade.
//!
//! [`AssetService`] is the only surface a front end (CLI, GUI, ...) talks
//! to: sync the catalog once at startup, list assets, and download an asset
//! by name.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::catalog::{Asset, AssetCatalog, CatalogStore, CatalogSyncer, SyncResult};
use crate::config::ConfigFile;
use crate::download::{AssetDownloader, HttpDownloader};
use crate::error::{AssetError, AssetResult};
use crate::http::{HttpClient, ReqwestClient, DEFAULT_TIMEOUT_SECS};
use crate::routing::{self, RoutingConfig};

/// Everything the service needs, passed in explicitly.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Remote catalog URL.
    pub catalog_url: String,
    /// Local catalog mirror.
    pub catalog_path: PathBuf,
    /// HTTP timeout for catalog and asset requests.
    pub timeout: Duration,
    /// Destination directories.
    pub routing: RoutingConfig,
}

impl ServiceConfig {
    pub fn new(
        catalog_url: impl Into<String>,
        catalog_path: impl Into<PathBuf>,
        routing: RoutingConfig,
    ) -> Self {
        Self {
            catalog_url: catalog_url.into(),
            catalog_path: catalog_path.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            routing,
        }
    }

    /// Set the HTTP timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build from the configuration file, applying defaults for unset paths.
    pub fn from_config_file(config: &ConfigFile) -> AssetResult<Self> {
        if config.catalog.url.trim().is_empty() {
            return Err(AssetError::InvalidConfig("catalog.url is not set".to_string()));
        }
        Ok(Self::new(
            config.catalog.url.clone(),
            config.catalog.local_path(),
            config.routing_config()?,
        )
        .with_timeout(config.catalog.timeout()))
    }
}

/// How the startup sync went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupSync {
    /// The remote catalog was reached.
    Synced(SyncResult),
    /// The remote catalog was unreachable; the existing local copy is used.
    Offline { reason: String },
}

/// Result of [`AssetService::sync_on_startup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupReport {
    pub sync: StartupSync,
    /// Number of assets in the loaded catalog.
    pub asset_count: usize,
}

impl fmt::Display for StartupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sync {
            StartupSync::Synced(result) => write!(f, "{}", result)?,
            StartupSync::Offline { reason } => {
                write!(f, "Could not check for catalog updates ({}); using local copy.", reason)?
            }
        }
        write!(f, " {} assets available.", self.asset_count)
    }
}

/// Result of [`AssetService::download_by_name`].
///
/// `Display` renders the status message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded {
        name: String,
        path: PathBuf,
        bytes: u64,
    },
    NotFound {
        name: String,
    },
    Failed {
        name: String,
        reason: String,
    },
}

impl DownloadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Downloaded { .. })
    }
}

impl fmt::Display for DownloadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Downloaded { name, path, .. } => {
                write!(f, "{} downloaded to {}", name, path.display())
            }
            Self::NotFound { .. } => write!(f, "Asset not found."),
            Self::Failed { name, reason } => write!(f, "Failed to download {}: {}", name, reason),
        }
    }
}

/// Catalog sync, listing and downloads behind one interface.
pub struct AssetService {
    config: ServiceConfig,
    syncer: CatalogSyncer,
    downloader: Box<dyn AssetDownloader + Send + Sync>,
    catalog: AssetCatalog,
}

impl AssetService {
    /// Create a service using a reqwest client with the configured timeout.
    pub fn new(config: ServiceConfig) -> AssetResult<Self> {
        let client = ReqwestClient::with_timeout(config.timeout)?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Create a service on top of an existing HTTP client.
    pub fn with_client(config: ServiceConfig, client: Arc<dyn HttpClient>) -> Self {
        Self {
            syncer: CatalogSyncer::new(client.clone()),
            downloader: Box::new(HttpDownloader::new(client)),
            config,
            catalog: AssetCatalog::default(),
        }
    }

    /// Replace the downloader.
    pub fn with_downloader(
        mut self,
        downloader: impl AssetDownloader + Send + Sync + 'static,
    ) -> Self {
        self.downloader = Box::new(downloader);
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Sync the local catalog with the remote one, then load it.
    ///
    /// A network failure is tolerated when a local catalog already exists.
    ///
    /// # Errors
    ///
    /// Fails if the sync fails and there is no local catalog, if the sync
    /// fails for a reason other than the network, or if the local catalog
    /// cannot be parsed.
    pub fn sync_on_startup(&mut self) -> AssetResult<StartupReport> {
        let store = CatalogStore::new(&self.config.catalog_path);

        let sync = match self
            .syncer
            .sync(&self.config.catalog_url, &self.config.catalog_path)
        {
            Ok(result) => StartupSync::Synced(result),
            Err(e) if e.is_network() && store.exists() => {
                warn!(
                    url = %self.config.catalog_url,
                    error = %e,
                    "Catalog sync failed, using local copy"
                );
                StartupSync::Offline {
                    reason: e.to_string(),
                }
            }
            Err(e) => return Err(e),
        };

        let asset_count = self.reload_catalog()?;
        Ok(StartupReport { sync, asset_count })
    }

    /// Load the local catalog without contacting the remote source.
    ///
    /// Returns the number of assets loaded.
    pub fn reload_catalog(&mut self) -> AssetResult<usize> {
        let store = CatalogStore::new(&self.config.catalog_path);
        self.catalog = AssetCatalog::load(&store)?;
        info!(
            path = %self.config.catalog_path.display(),
            assets = self.catalog.len(),
            "Catalog loaded"
        );
        Ok(self.catalog.len())
    }

    /// All assets in catalog order.
    pub fn list_assets(&self) -> &[Asset] {
        self.catalog.assets()
    }

    /// The loaded catalog.
    pub fn catalog(&self) -> &AssetCatalog {
        &self.catalog
    }

    /// Look up an asset and compute where it would be saved.
    pub fn resolve_destination(&self, name: &str) -> AssetResult<(&Asset, PathBuf)> {
        let asset = self
            .catalog
            .lookup(name)
            .ok_or_else(|| AssetError::NotFound(name.to_string()))?;
        validate_asset(asset)?;
        Ok((asset, routing::resolve(asset, &self.config.routing)))
    }

    /// Download an asset by name to its routed destination.
    ///
    /// Never fails: not-found and download errors are reported in the
    /// outcome and leave the catalog untouched.
    pub fn download_by_name(&self, name: &str) -> DownloadOutcome {
        let Some(asset) = self.catalog.lookup(name) else {
            debug!(name = %name, "Asset not in catalog");
            return DownloadOutcome::NotFound {
                name: name.to_string(),
            };
        };

        if let Err(e) = validate_asset(asset) {
            warn!(name = %asset.name, error = %e, "Asset cannot be downloaded");
            return DownloadOutcome::Failed {
                name: asset.name.clone(),
                reason: e.to_string(),
            };
        }

        let dest = routing::resolve(asset, &self.config.routing);
        match self.downloader.fetch_to(&asset.url, &dest) {
            Ok(bytes) => DownloadOutcome::Downloaded {
                name: asset.name.clone(),
                path: dest,
                bytes,
            },
            Err(e) => DownloadOutcome::Failed {
                name: asset.name.clone(),
                reason: e.to_string(),
            },
        }
    }
}

/// Reject entries that cannot be written safely.
///
/// The filename must be a single path component, so a catalog entry can
/// never write outside its routed directory.
fn validate_asset(asset: &Asset) -> AssetResult<()> {
    let invalid = |reason: &str| AssetError::InvalidAsset {
        name: asset.name.clone(),
        reason: reason.to_string(),
    };

    if asset.filename.is_empty() {
        return Err(invalid("catalog entry has no filename"));
    }
    if Path::new(&asset.filename).file_name() != Some(OsStr::new(&asset.filename)) {
        return Err(invalid("filename must not contain path separators"));
    }
    if asset.url.is_empty() {
        return Err(invalid("catalog entry has no url"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SyncStatus;
    use crate::http::tests::MockHttpClient;
    use std::fs;
    use tempfile::TempDir;

    const CATALOG_URL: &str = "http://catalog.test/Assetfile.xml";

    const CATALOG: &[u8] = br#"<assets>
  <asset>
    <name>Pack1</name>
    <filename>pack1.zip</filename>
    <division>minecraft@rp</division>
    <description>First pack</description>
    <url>http://example/pack1.zip</url>
  </asset>
  <asset>
    <name>Sneaky</name>
    <filename>../escape.zip</filename>
    <division>generic@generic</division>
    <url>http://example/escape.zip</url>
  </asset>
  <asset>
    <name>NoFile</name>
    <url>http://example/nofile.zip</url>
  </asset>
  <asset>
    <name>Gone</name>
    <filename>gone.zip</filename>
    <division>weird@thing</division>
    <url>http://example/gone.zip</url>
  </asset>
</assets>"#;

    struct Fixture {
        temp: TempDir,
        client: Arc<MockHttpClient>,
        service: AssetService,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let root = temp.path();
            let routing = RoutingConfig::new(
                root.join("mods"),
                root.join("rp"),
                root.join("generic"),
                root.join("downloads"),
            )
            .unwrap();
            let config = ServiceConfig::new(CATALOG_URL, root.join("assets/Assetfile.xml"), routing);

            let client = Arc::new(
                MockHttpClient::new()
                    .with_response(CATALOG_URL, CATALOG)
                    .with_response("http://example/pack1.zip", b"pack one bytes"),
            );
            let service = AssetService::with_client(config, client.clone());

            Self {
                temp,
                client,
                service,
            }
        }

        fn path(&self, rel: &str) -> PathBuf {
            self.temp.path().join(rel)
        }
    }

    #[test]
    fn test_startup_sync_loads_catalog() {
        let mut fx = Fixture::new();

        let report = fx.service.sync_on_startup().unwrap();

        assert!(matches!(
            report.sync,
            StartupSync::Synced(SyncResult { status: SyncStatus::Updated, .. })
        ));
        assert_eq!(report.asset_count, 4);
        assert_eq!(fx.service.list_assets()[0].name, "Pack1");
    }

    #[test]
    fn test_startup_offline_with_local_copy() {
        let mut fx = Fixture::new();
        fx.service.sync_on_startup().unwrap();

        fx.client.remove_response(CATALOG_URL);
        let report = fx.service.sync_on_startup().unwrap();

        assert!(matches!(report.sync, StartupSync::Offline { .. }));
        assert_eq!(report.asset_count, 4);
        assert!(report.to_string().contains("using local copy"));
    }

    #[test]
    fn test_startup_offline_without_local_copy_is_fatal() {
        let mut fx = Fixture::new();
        fx.client.remove_response(CATALOG_URL);

        let err = fx.service.sync_on_startup().unwrap_err();

        assert!(err.is_network());
        assert!(fx.service.list_assets().is_empty());
    }

    #[test]
    fn test_malformed_local_catalog_is_fatal() {
        let mut fx = Fixture::new();
        fx.client.set_response(CATALOG_URL, b"<assets><asset>");

        let err = fx.service.sync_on_startup().unwrap_err();
        assert!(matches!(err, AssetError::MalformedCatalog(_)));
    }

    #[test]
    fn test_download_by_name_routes_and_writes() {
        let mut fx = Fixture::new();
        fx.service.sync_on_startup().unwrap();

        let outcome = fx.service.download_by_name("pack1");

        let expected = fx.path("rp/pack1.zip");
        assert_eq!(
            outcome,
            DownloadOutcome::Downloaded {
                name: "Pack1".to_string(),
                path: expected.clone(),
                bytes: 14,
            }
        );
        assert_eq!(fs::read(&expected).unwrap(), b"pack one bytes");
        assert_eq!(
            outcome.to_string(),
            format!("Pack1 downloaded to {}", expected.display())
        );
    }

    #[test]
    fn test_not_found_touches_nothing() {
        let mut fx = Fixture::new();
        fx.service.sync_on_startup().unwrap();
        let requests = fx.client.request_count();

        let outcome = fx.service.download_by_name("missing");

        assert!(matches!(outcome, DownloadOutcome::NotFound { .. }));
        assert_eq!(outcome.to_string(), "Asset not found.");
        assert_eq!(fx.client.request_count(), requests);
        for dir in ["mods", "rp", "generic", "downloads"] {
            assert!(!fx.path(dir).exists());
        }
    }

    #[test]
    fn test_path_traversal_rejected() {
        let mut fx = Fixture::new();
        fx.service.sync_on_startup().unwrap();

        let outcome = fx.service.download_by_name("sneaky");

        assert!(matches!(outcome, DownloadOutcome::Failed { ref name, .. } if name == "Sneaky"));
        assert!(!fx.path("escape.zip").exists());
    }

    #[test]
    fn test_empty_filename_fails() {
        let mut fx = Fixture::new();
        fx.service.sync_on_startup().unwrap();

        let outcome = fx.service.download_by_name("nofile");

        assert!(!outcome.is_success());
        assert!(outcome.to_string().starts_with("Failed to download NoFile:"));
        assert!(outcome.to_string().contains("no filename"));
    }

    #[test]
    fn test_download_failure_keeps_catalog() {
        let mut fx = Fixture::new();
        fx.service.sync_on_startup().unwrap();

        let outcome = fx.service.download_by_name("Gone");

        assert!(matches!(outcome, DownloadOutcome::Failed { ref name, .. } if name == "Gone"));
        assert_eq!(fx.service.list_assets().len(), 4);
        assert!(!fx.path("downloads/gone.zip").exists());
    }

    #[test]
    fn test_resolve_destination() {
        let mut fx = Fixture::new();
        fx.service.sync_on_startup().unwrap();

        let (asset, path) = fx.service.resolve_destination("GONE").unwrap();

        assert_eq!(asset.name, "Gone");
        assert_eq!(path, fx.path("downloads/gone.zip"));
    }

    #[test]
    fn test_service_config_from_config_file() {
        let temp = TempDir::new().unwrap();
        let mut file = ConfigFile::default();
        file.catalog.url = "https://example.com/a.xml".to_string();
        file.catalog.local_path = Some(temp.path().join("Assetfile.xml"));
        file.catalog.timeout = 5;
        file.minecraft.mods_path = Some(temp.path().join("m"));
        file.minecraft.resourcepacks_path = Some(temp.path().join("r"));
        file.generic.generic_path = Some(temp.path().join("g"));
        file.downloads.directory = Some(temp.path().join("d"));

        let config = ServiceConfig::from_config_file(&file).unwrap();

        assert_eq!(config.catalog_url, "https://example.com/a.xml");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.routing.mods_path(), temp.path().join("m"));
    }
}
