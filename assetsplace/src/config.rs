//! Configuration file handling.
//!
//! Settings live in an INI file at `<config dir>/assetsplace/config.ini`:
//!
//! ```ini
//! [catalog]
//! url = https://example.com/assets/Assetfile.xml
//! local_path =
//! timeout = 30
//!
//! [minecraft]
//! mods_path =
//! resourcepacks_path =
//!
//! [generic]
//! generic_path =
//!
//! [downloads]
//! directory =
//! ```
//!
//! Empty values mean "not set" and are replaced by platform defaults when the
//! routing configuration is built.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use ini::{EscapePolicy, Ini, ParseOption};

use crate::error::{AssetError, AssetResult};
use crate::http::DEFAULT_TIMEOUT_SECS;
use crate::routing::RoutingConfig;

/// Application directory name under the platform config and data dirs.
pub const APP_DIR_NAME: &str = "assetsplace";

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.ini";

/// Local catalog filename.
pub const CATALOG_FILENAME: &str = "Assetfile.xml";

/// Default remote catalog location.
pub const DEFAULT_CATALOG_URL: &str =
    "https://raw.githubusercontent.com/yourusername/yourrepo/main/assets/Assetfile.xml";

/// Folder created under the user's downloads directory for unrouted assets.
pub const DOWNLOADS_FOLDER_NAME: &str = "TheAssetsPlace";

/// Path of the configuration file.
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(CONFIG_FILENAME)
}

/// Default directory for log files.
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
        .join("logs")
}

/// Default location of the local catalog mirror.
pub fn default_catalog_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(CATALOG_FILENAME)
}

/// The `.minecraft` directory for the current platform, if a home can be found.
pub fn minecraft_dir() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        dirs::data_dir().map(|d| d.join(".minecraft"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir().map(|d| d.join("minecraft"))
    } else {
        dirs::home_dir().map(|d| d.join(".minecraft"))
    }
}

/// Default directory for assets with no specific destination.
pub fn default_downloads_dir() -> Option<PathBuf> {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join("Downloads")))
        .map(|d| d.join(DOWNLOADS_FOLDER_NAME))
}

/// `[catalog]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    /// Remote catalog URL.
    pub url: String,
    /// Local mirror path; `None` uses [`default_catalog_path`].
    pub local_path: Option<PathBuf>,
    /// HTTP timeout in seconds.
    pub timeout: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_CATALOG_URL.to_string(),
            local_path: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl CatalogSettings {
    pub fn local_path(&self) -> PathBuf {
        self.local_path.clone().unwrap_or_else(default_catalog_path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// `[minecraft]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MinecraftSettings {
    pub mods_path: Option<PathBuf>,
    pub resourcepacks_path: Option<PathBuf>,
}

/// `[generic]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenericSettings {
    pub generic_path: Option<PathBuf>,
}

/// `[downloads]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadSettings {
    /// Destination for assets whose division is not routed elsewhere.
    pub directory: Option<PathBuf>,
}

/// Contents of `config.ini`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigFile {
    pub catalog: CatalogSettings,
    pub minecraft: MinecraftSettings,
    pub generic: GenericSettings,
    pub downloads: DownloadSettings,
}

impl ConfigFile {
    /// Load the configuration from [`config_file_path`].
    pub fn load() -> AssetResult<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load the configuration from `path`.
    ///
    /// Missing keys take their defaults; an unreadable or unparseable file
    /// is an error.
    pub fn load_from(path: &Path) -> AssetResult<Self> {
        // Escapes off: Windows paths are written with bare backslashes.
        let option = ParseOption {
            enabled_escape: false,
            ..Default::default()
        };
        let ini = Ini::load_from_file_opt(path, option).map_err(|e| {
            AssetError::InvalidConfig(format!("failed to load {}: {}", path.display(), e))
        })?;

        let mut config = Self::default();
        for key in ConfigKey::all() {
            if let Some(value) = ini.get_from(Some(key.section()), key.key_name()) {
                key.set(&mut config, value)?;
            }
        }
        Ok(config)
    }

    /// Save the configuration to [`config_file_path`].
    pub fn save(&self) -> AssetResult<()> {
        self.save_to(&config_file_path())
    }

    /// Save the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> AssetResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| AssetError::CreateDirFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            ini.with_section(Some(key.section()))
                .set(key.key_name(), key.get(self));
        }

        ini.write_to_file_policy(path, EscapePolicy::Nothing)
            .map_err(|e| AssetError::WriteFailed {
                path: path.to_path_buf(),
                source: e,
            })
    }

    /// Write a default configuration to `path` if no file exists there.
    ///
    /// Returns `true` if a file was created.
    pub fn ensure_exists(path: &Path) -> AssetResult<bool> {
        if path.exists() {
            return Ok(false);
        }
        Self::default().save_to(path)?;
        Ok(true)
    }

    /// Build the routing configuration, filling unset paths with platform
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a configured path is relative, or if a
    /// path is unset and no default can be determined.
    pub fn routing_config(&self) -> AssetResult<RoutingConfig> {
        let minecraft = minecraft_dir();
        let downloads = match &self.downloads.directory {
            Some(dir) => Some(dir.clone()),
            None => default_downloads_dir(),
        };

        let mods = self
            .minecraft
            .mods_path
            .clone()
            .or_else(|| minecraft.as_ref().map(|d| d.join("mods")));
        let resourcepacks = self
            .minecraft
            .resourcepacks_path
            .clone()
            .or_else(|| minecraft.as_ref().map(|d| d.join("resourcepacks")));
        let generic = self.generic.generic_path.clone().or_else(|| downloads.clone());

        RoutingConfig::new(
            required("minecraft.mods_path", mods)?,
            required("minecraft.resourcepacks_path", resourcepacks)?,
            required("generic.generic_path", generic)?,
            required("downloads.directory", downloads)?,
        )
    }
}

fn required(key: &str, path: Option<PathBuf>) -> AssetResult<PathBuf> {
    path.ok_or_else(|| {
        AssetError::InvalidConfig(format!(
            "{} is not set and no default could be determined",
            key
        ))
    })
}

/// Every settable configuration key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    CatalogUrl,
    CatalogLocalPath,
    CatalogTimeout,
    MinecraftModsPath,
    MinecraftResourcepacksPath,
    GenericPath,
    DownloadsDirectory,
}

impl ConfigKey {
    /// All keys in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::CatalogUrl,
            ConfigKey::CatalogLocalPath,
            ConfigKey::CatalogTimeout,
            ConfigKey::MinecraftModsPath,
            ConfigKey::MinecraftResourcepacksPath,
            ConfigKey::GenericPath,
            ConfigKey::DownloadsDirectory,
        ]
    }

    pub fn section(&self) -> &'static str {
        match self {
            Self::CatalogUrl | Self::CatalogLocalPath | Self::CatalogTimeout => "catalog",
            Self::MinecraftModsPath | Self::MinecraftResourcepacksPath => "minecraft",
            Self::GenericPath => "generic",
            Self::DownloadsDirectory => "downloads",
        }
    }

    pub fn key_name(&self) -> &'static str {
        match self {
            Self::CatalogUrl => "url",
            Self::CatalogLocalPath => "local_path",
            Self::CatalogTimeout => "timeout",
            Self::MinecraftModsPath => "mods_path",
            Self::MinecraftResourcepacksPath => "resourcepacks_path",
            Self::GenericPath => "generic_path",
            Self::DownloadsDirectory => "directory",
        }
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Current value as a string; unset values are empty.
    pub fn get(&self, config: &ConfigFile) -> String {
        let path = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        };
        match self {
            Self::CatalogUrl => config.catalog.url.clone(),
            Self::CatalogLocalPath => path(&config.catalog.local_path),
            Self::CatalogTimeout => config.catalog.timeout.to_string(),
            Self::MinecraftModsPath => path(&config.minecraft.mods_path),
            Self::MinecraftResourcepacksPath => path(&config.minecraft.resourcepacks_path),
            Self::GenericPath => path(&config.generic.generic_path),
            Self::DownloadsDirectory => path(&config.downloads.directory),
        }
    }

    /// Set a value from its string form. An empty string unsets paths.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> AssetResult<()> {
        let value = value.trim();
        let path = || (!value.is_empty()).then(|| PathBuf::from(value));
        match self {
            Self::CatalogUrl => {
                config.catalog.url = if value.is_empty() {
                    DEFAULT_CATALOG_URL.to_string()
                } else {
                    value.to_string()
                };
            }
            Self::CatalogLocalPath => config.catalog.local_path = path(),
            Self::CatalogTimeout => {
                config.catalog.timeout = if value.is_empty() {
                    DEFAULT_TIMEOUT_SECS
                } else {
                    parse_timeout(value)?
                };
            }
            Self::MinecraftModsPath => config.minecraft.mods_path = path(),
            Self::MinecraftResourcepacksPath => config.minecraft.resourcepacks_path = path(),
            Self::GenericPath => config.generic.generic_path = path(),
            Self::DownloadsDirectory => config.downloads.directory = path(),
        }
        Ok(())
    }
}

fn parse_timeout(value: &str) -> AssetResult<u64> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(AssetError::InvalidConfig(format!(
            "catalog.timeout must be a positive number of seconds, got '{}'",
            value
        ))),
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.key_name())
    }
}

impl FromStr for ConfigKey {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == s)
            .ok_or_else(|| AssetError::InvalidConfig(format!("unknown configuration key '{}'", s)))
    }
}
