//! Error types for catalog synchronization and asset downloads.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for library operations.
pub type AssetResult<T> = Result<T, AssetError>;

/// Broad classes of failure, used by callers to pick a recovery policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Unreachable host, timeout or non-success response.
    Network,
    /// Permission denied, disk full, path creation failure.
    Filesystem,
    /// The catalog document could not be parsed.
    MalformedCatalog,
    /// No asset matches the requested name.
    NotFound,
    /// Configuration missing, unreadable or incomplete.
    Config,
}

/// Errors that can occur while syncing the catalog or downloading assets.
#[derive(Debug, Error)]
pub enum AssetError {
    /// HTTP request failed or returned a non-success status.
    #[error("failed to fetch {url}: {reason}")]
    Network { url: String, reason: String },

    /// HTTP request exceeded the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    /// Failed to read a file.
    #[error("failed to read {}: {source}", path.display())]
    ReadFailed { path: PathBuf, source: io::Error },

    /// Failed to write a file.
    #[error("failed to write {}: {source}", path.display())]
    WriteFailed { path: PathBuf, source: io::Error },

    /// Failed to create a directory.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDirFailed { path: PathBuf, source: io::Error },

    /// The catalog document is not well-formed.
    #[error("malformed catalog: {0}")]
    MalformedCatalog(String),

    /// No asset in the catalog matches the requested name.
    #[error("asset not found: {0}")]
    NotFound(String),

    /// A catalog entry cannot be downloaded as written.
    #[error("asset {name} cannot be downloaded: {reason}")]
    InvalidAsset { name: String, reason: String },

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AssetError {
    /// The failure class of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Network { .. } | Self::Timeout { .. } => ErrorCategory::Network,
            Self::ReadFailed { .. } | Self::WriteFailed { .. } | Self::CreateDirFailed { .. } => {
                ErrorCategory::Filesystem
            }
            Self::MalformedCatalog(_) | Self::InvalidAsset { .. } => {
                ErrorCategory::MalformedCatalog
            }
            Self::NotFound(_) => ErrorCategory::NotFound,
            Self::InvalidConfig(_) => ErrorCategory::Config,
        }
    }

    /// Returns true for network failures (including timeouts).
    pub fn is_network(&self) -> bool {
        self.category() == ErrorCategory::Network
    }
}
