//! Download commands - fetch an asset or show where it would go.

use assetsplace::{AssetError, DownloadOutcome};
use console::style;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the download command.
///
/// Prints the outcome message; a missing asset or failed download exits
/// with an error.
pub fn run(name: &str, verbose: bool) -> Result<(), CliError> {
    let runner = CliRunner::start("download", verbose)?;

    match runner.service().download_by_name(name) {
        outcome @ DownloadOutcome::Downloaded { .. } => {
            println!("{}", style(outcome).green());
            Ok(())
        }
        outcome => Err(CliError::Download(outcome.to_string())),
    }
}

/// Run the where command.
pub fn run_where(name: &str, verbose: bool) -> Result<(), CliError> {
    let runner = CliRunner::start("where", verbose)?;

    match runner.service().resolve_destination(name) {
        Ok((asset, path)) => {
            println!("{} -> {}", asset.name, path.display());
            Ok(())
        }
        Err(AssetError::NotFound(_)) => Err(CliError::Download("Asset not found.".to_string())),
        Err(e) => Err(e.into()),
    }
}
