//! Sync command - check the remote catalog for updates.

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the sync command.
pub fn run(verbose: bool) -> Result<(), CliError> {
    let runner = CliRunner::start("sync", verbose)?;
    println!("{}", runner.report());
    Ok(())
}
