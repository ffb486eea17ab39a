//! The Assets Place CLI - Command-line interface
//!
//! This binary provides a command-line front end to the assetsplace library:
//! sync the catalog, list assets, and download them by name.

mod commands;
mod error;
mod runner;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "assetsplace", version, about = "Download catalogued game assets")]
struct Cli {
    /// Log debug output to the log file
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the configuration file with default settings
    Init,

    /// Check the remote catalog for updates
    Sync,

    /// List all assets in the catalog
    List,

    /// Download an asset by name
    Download {
        /// Asset name (case-insensitive)
        name: String,
    },

    /// Show where an asset would be saved, without downloading it
    Where {
        /// Asset name (case-insensitive)
        name: String,
    },

    /// View or change configuration settings
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Init => commands::init::run(),
        Commands::Config(command) => commands::config::run(command),
        Commands::Sync => commands::sync::run(cli.verbose),
        Commands::List => commands::list::run(cli.verbose),
        Commands::Download { name } => commands::download::run(&name, cli.verbose),
        Commands::Where { name } => commands::download::run_where(&name, cli.verbose),
    }
}
