//! Local catalog file ownership.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{AssetError, AssetResult};

/// Owns the local catalog file.
///
/// The store reads and writes raw bytes and never interprets them.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the local catalog file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a local catalog file is present.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the stored bytes. A missing file reads as empty.
    pub fn read(&self) -> AssetResult<Vec<u8>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(AssetError::ReadFailed {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    /// Replace the stored bytes in full.
    ///
    /// The new content goes to a sibling temporary file first and is renamed
    /// over the catalog, so readers never observe a half-written catalog.
    pub fn write(&self, bytes: &[u8]) -> AssetResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| AssetError::CreateDirFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let staging = staging_path(&self.path);
        let write_failed = |source| AssetError::WriteFailed {
            path: self.path.clone(),
            source,
        };

        let result = fs::File::create(&staging)
            .and_then(|mut file| {
                file.write_all(bytes)?;
                file.sync_all()
            })
            .and_then(|_| fs::rename(&staging, &self.path));

        if let Err(e) = result {
            fs::remove_file(&staging).ok();
            return Err(write_failed(e));
        }
        Ok(())
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
