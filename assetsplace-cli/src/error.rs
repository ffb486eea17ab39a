//! CLI error types.

use std::fmt;

use assetsplace::AssetError;

/// Errors surfaced to the user by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid.
    Config(String),

    /// Catalog could not be synced or loaded at startup.
    Startup(AssetError),

    /// Logging could not be initialized.
    Logging(AssetError),

    /// A download did not complete.
    Download(String),

    /// Any other library error.
    Asset(AssetError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Startup(e) => write!(f, "Failed to load the asset catalog: {}", e),
            CliError::Logging(e) => write!(f, "Failed to initialize logging: {}", e),
            CliError::Download(msg) => write!(f, "{}", msg),
            CliError::Asset(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Startup(e) | CliError::Logging(e) | CliError::Asset(e) => Some(e),
            CliError::Config(_) | CliError::Download(_) => None,
        }
    }
}

impl From<AssetError> for CliError {
    fn from(e: AssetError) -> Self {
        match e {
            AssetError::InvalidConfig(msg) => CliError::Config(msg),
            other => CliError::Asset(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_display() {
        let err = CliError::Config("catalog.url is not set".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("catalog.url"));
    }

    #[test]
    fn test_invalid_config_maps_to_config_error() {
        let err: CliError = AssetError::InvalidConfig("bad".to_string()).into();
        assert!(matches!(err, CliError::Config(_)));

        let err: CliError = AssetError::NotFound("x".to_string()).into();
        assert!(matches!(err, CliError::Asset(_)));
    }
}
