//! Shared startup for commands that need the catalog.

use assetsplace::config::{config_file_path, default_log_dir, ConfigFile};
use assetsplace::logging::{init_logging, LogGuard};
use assetsplace::{AssetService, ServiceConfig, StartupReport};
use tracing::info;

use crate::error::CliError;

/// Loads configuration, installs logging and syncs the catalog.
pub struct CliRunner {
    service: AssetService,
    report: StartupReport,
    _log_guard: LogGuard,
}

impl CliRunner {
    /// Run the startup sequence.
    ///
    /// A default configuration file is written first if none exists.
    pub fn start(command: &str, verbose: bool) -> Result<Self, CliError> {
        let log_guard = init_logging(&default_log_dir(), verbose).map_err(CliError::Logging)?;
        info!(command, version = assetsplace::VERSION, "Starting assetsplace");

        let path = config_file_path();
        if ConfigFile::ensure_exists(&path)? {
            println!(
                "Default config.ini created at {}. Please update the paths accordingly.",
                path.display()
            );
        }

        let config = ConfigFile::load_from(&path)?;
        let service_config = ServiceConfig::from_config_file(&config)?;

        let mut service = AssetService::new(service_config)?;
        let report = service.sync_on_startup().map_err(CliError::Startup)?;
        info!(assets = report.asset_count, "Catalog ready");

        Ok(Self {
            service,
            report,
            _log_guard: log_guard,
        })
    }

    pub fn service(&self) -> &AssetService {
        &self.service
    }

    pub fn report(&self) -> &StartupReport {
        &self.report
    }
}
