//! The Assets Place - catalog mirror and asset downloader
//!
//! This library keeps a local copy of a remotely published asset catalog
//! in sync and downloads catalogued assets (Minecraft mods, resource packs
//! and generic files) into per-category directories.
//!
//! Front ends talk to [`service::AssetService`]; the modules below it are
//! usable on their own.

pub mod catalog;
pub mod config;
pub mod download;
pub mod error;
pub mod http;
pub mod logging;
pub mod routing;
pub mod service;

pub use catalog::{Asset, AssetCatalog, SyncResult, SyncStatus};
pub use error::{AssetError, AssetResult, ErrorCategory};
pub use service::{AssetService, DownloadOutcome, ServiceConfig, StartupReport, StartupSync};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
