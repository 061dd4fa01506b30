//! `rigbook` - Inventory manager for PC build configurations
//!
//! Command-line front end over the `rigbook` library. Configurations are kept
//! in `<data dir>/<storage key>.json`, logs in `<data dir>/logs`.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use rigbook::{
    error::{RigbookError, get_user_friendly_error},
    settings::{Settings, SettingsManager},
    storage::FileStore,
    store::ConfigStore,
    utils,
};
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Command failed: {:#}", e);
            let message = match e.downcast_ref::<RigbookError>() {
                Some(rigbook_error) => get_user_friendly_error(rigbook_error),
                None => format!("{e:#}"),
            };
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let data_dir = SettingsManager::data_dir(cli.data_dir.as_deref());
    let settings = SettingsManager::load(&data_dir).context("Failed to load settings")?;

    utils::init_logging(&Settings::log_dir(&data_dir), &settings)
        .context("Failed to initialize logging system")?;
    info!("Using data directory {}", data_dir.display());

    let mut store = ConfigStore::load_with_key(FileStore::new(&data_dir), &settings.storage_key);
    info!("Configuration store loaded with {} configurations", store.len());

    cli::run(cli.command, &mut store, &settings, &data_dir)
}
