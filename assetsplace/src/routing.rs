//! Destination routing by asset division.
//!
//! Each asset carries a `<namespace>@<category>` division tag. The routing
//! table maps known tags onto configured base directories; anything else,
//! including malformed tags, lands in the default downloads directory so
//! that entries using a newer division can still be downloaded.

use std::path::{Path, PathBuf};

use crate::catalog::Asset;
use crate::error::{AssetError, AssetResult};

/// Known download destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Division {
    /// `minecraft@mod`
    MinecraftMod,
    /// `minecraft@rp`
    MinecraftResourcePack,
    /// `generic@generic`
    Generic,
    /// Any other tag.
    Other,
}

/// Division tags and their destinations. Adding a category is an edit here
/// plus a base directory in [`RoutingConfig`].
const ROUTING_TABLE: &[(&str, Division)] = &[
    ("minecraft@mod", Division::MinecraftMod),
    ("minecraft@rp", Division::MinecraftResourcePack),
    ("generic@generic", Division::Generic),
];

impl Division {
    /// Classify a division tag. Matching is exact and case-sensitive.
    pub fn from_tag(tag: &str) -> Self {
        ROUTING_TABLE
            .iter()
            .find(|(known, _)| *known == tag)
            .map(|(_, division)| *division)
            .unwrap_or(Division::Other)
    }

    /// The tag for this division, `None` for [`Division::Other`].
    pub fn tag(&self) -> Option<&'static str> {
        ROUTING_TABLE
            .iter()
            .find(|(_, division)| division == self)
            .map(|(tag, _)| *tag)
    }
}

/// Base directories for each division.
///
/// All paths are absolute; construction fails otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingConfig {
    mods_path: PathBuf,
    resourcepacks_path: PathBuf,
    generic_path: PathBuf,
    default_path: PathBuf,
}

impl RoutingConfig {
    /// Create a routing configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if any path is empty or relative.
    pub fn new(
        mods_path: impl Into<PathBuf>,
        resourcepacks_path: impl Into<PathBuf>,
        generic_path: impl Into<PathBuf>,
        default_path: impl Into<PathBuf>,
    ) -> AssetResult<Self> {
        let config = Self {
            mods_path: mods_path.into(),
            resourcepacks_path: resourcepacks_path.into(),
            generic_path: generic_path.into(),
            default_path: default_path.into(),
        };

        for (key, path) in [
            ("minecraft.mods_path", &config.mods_path),
            ("minecraft.resourcepacks_path", &config.resourcepacks_path),
            ("generic.generic_path", &config.generic_path),
            ("downloads.directory", &config.default_path),
        ] {
            require_absolute(key, path)?;
        }

        Ok(config)
    }

    /// Base directory for a division.
    pub fn base_dir(&self, division: Division) -> &Path {
        match division {
            Division::MinecraftMod => &self.mods_path,
            Division::MinecraftResourcePack => &self.resourcepacks_path,
            Division::Generic => &self.generic_path,
            Division::Other => &self.default_path,
        }
    }

    pub fn mods_path(&self) -> &Path {
        &self.mods_path
    }

    pub fn resourcepacks_path(&self) -> &Path {
        &self.resourcepacks_path
    }

    pub fn generic_path(&self) -> &Path {
        &self.generic_path
    }

    pub fn default_path(&self) -> &Path {
        &self.default_path
    }
}

fn require_absolute(key: &str, path: &Path) -> AssetResult<()> {
    if path.as_os_str().is_empty() {
        return Err(AssetError::InvalidConfig(format!("{} is not set", key)));
    }
    if !path.is_absolute() {
        return Err(AssetError::InvalidConfig(format!(
            "{} must be an absolute path, got {}",
            key,
            path.display()
        )));
    }
    Ok(())
}

/// Destination path for an asset: its division's base directory joined
/// with its filename.
pub fn resolve(asset: &Asset, config: &RoutingConfig) -> PathBuf {
    config
        .base_dir(Division::from_tag(&asset.division))
        .join(&asset.filename)
}
