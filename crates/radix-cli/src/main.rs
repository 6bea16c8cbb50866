use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use radix_core::config::RadixConfig;
use radix_infrastructure::{ConfigService, DataLayout};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "radix")]
#[command(about = "RADIX - number base conversion workbench", long_about = None)]
struct Cli {
    /// Log in as this user instead of prompting
    #[arg(long, global = true)]
    user: Option<String>,

    /// Read configuration from this file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Store users, exports and logs under this directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Maximum fractional digits per conversion
    #[arg(long, global = true)]
    precision: Option<usize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one value without recording it
    Convert {
        /// The number to convert, e.g. "ff" or "101.01"
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Base the value is written in (2-36)
        #[arg(long = "from")]
        from: u32,
        /// Base to convert into (2-36)
        #[arg(long = "to")]
        to: u32,
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Applies command-line overrides on top of the config file.
fn resolve_config(cli: &Cli) -> Result<RadixConfig> {
    let mut config =
        ConfigService::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if let Some(precision) = cli.precision {
        config.precision = precision;
    }

    config.validate().context("Invalid command-line override")?;
    Ok(config)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = resolve_config(&cli)?;
    let layout = DataLayout::from_config(&config).context("Failed to resolve data directory")?;
    let _log_guard = logging::init(&layout.logs_dir(), &config.log_level)?;

    tracing::info!("radix started (data dir {})", layout.data_dir().display());

    match cli.command {
        Some(Commands::Convert {
            value,
            from,
            to,
            json,
        }) => commands::convert::run(&config, &value, from, to, json),
        None => {
            commands::repl::run(config, &layout, cli.user.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
