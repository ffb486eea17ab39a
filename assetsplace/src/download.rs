//! HTTP asset downloader.
//!
//! Bytes are streamed into a `.part` file next to the destination, synced,
//! and then renamed over the destination. A failed download removes the
//! `.part` file and leaves any previous file at the destination intact.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{AssetError, AssetResult};
use crate::http::HttpClient;

/// Buffer size for reading/writing during downloads (64KB).
const BUFFER_SIZE: usize = 64 * 1024;

/// Suffix of the in-progress download file.
const PARTIAL_SUFFIX: &str = ".part";

/// Trait for fetching a remote resource to a local path.
pub trait AssetDownloader {
    /// Download `url` to `dest`, overwriting any existing file.
    ///
    /// Returns the number of bytes written once they are flushed to storage.
    fn fetch_to(&self, url: &str, dest: &Path) -> AssetResult<u64>;
}

/// Downloader backed by an [`HttpClient`].
#[derive(Clone)]
pub struct HttpDownloader {
    client: Arc<dyn HttpClient>,
}

impl HttpDownloader {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self { client }
    }

    /// Stream the response body into `file`.
    fn stream_download(
        &self,
        url: &str,
        mut body: impl Read,
        file: File,
        partial: &Path,
    ) -> AssetResult<u64> {
        let mut writer = BufWriter::new(file);
        let mut buffer = vec![0u8; BUFFER_SIZE];
        let mut downloaded = 0u64;

        loop {
            let bytes_read = body.read(&mut buffer).map_err(|e| AssetError::Network {
                url: url.to_string(),
                reason: format!("read error: {}", e),
            })?;

            if bytes_read == 0 {
                break;
            }

            writer
                .write_all(&buffer[..bytes_read])
                .map_err(|e| write_failed(partial, e))?;

            downloaded += bytes_read as u64;
        }

        let file = writer
            .into_inner()
            .map_err(|e| write_failed(partial, e.into_error()))?;
        file.sync_all().map_err(|e| write_failed(partial, e))?;

        Ok(downloaded)
    }
}

impl AssetDownloader for HttpDownloader {
    fn fetch_to(&self, url: &str, dest: &Path) -> AssetResult<u64> {
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| AssetError::CreateDirFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let body = self.client.open(url)?;

        let partial = partial_path(dest);
        let file = File::create(&partial).map_err(|e| write_failed(&partial, e))?;

        let result = self
            .stream_download(url, body, file, &partial)
            .and_then(|bytes| {
                fs::rename(&partial, dest).map_err(|e| write_failed(dest, e))?;
                Ok(bytes)
            });

        match result {
            Ok(bytes) => {
                info!(url = %url, path = %dest.display(), bytes, "Download complete");
                Ok(bytes)
            }
            Err(e) => {
                if let Err(cleanup) = fs::remove_file(&partial) {
                    debug!(path = %partial.display(), error = %cleanup, "No partial file to remove");
                }
                warn!(url = %url, path = %dest.display(), error = %e, "Download failed");
                Err(e)
            }
        }
    }
}

fn write_failed(path: &Path, source: std::io::Error) -> AssetError {
    AssetError::WriteFailed {
        path: path.to_path_buf(),
        source,
    }
}

/// `<dest>.part` in the same directory, so the final rename stays on one
/// filesystem.
fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(PARTIAL_SUFFIX);
    dest.with_file_name(name)
}
