//! List command - print every asset in the catalog.

use console::style;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Run the list command.
pub fn run(verbose: bool) -> Result<(), CliError> {
    let runner = CliRunner::start("list", verbose)?;
    let assets = runner.service().list_assets();

    if assets.is_empty() {
        println!("The catalog is empty.");
        return Ok(());
    }

    for asset in assets {
        if asset.description.is_empty() {
            println!("{}", style(&asset.name).bold());
        } else {
            println!("{}: {}", style(&asset.name).bold(), asset.description);
        }
        println!("  URL: {}", style(&asset.url).dim());
    }
    println!();
    println!("{} assets", assets.len());
    Ok(())
}
