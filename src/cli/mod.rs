//! Command-line front end
//!
//! Turns arguments into typed values, calls the `ConfigStore` operations and
//! prints their results. No pricing logic lives here.

mod parts;
mod settings;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use parts::{PartSpec, parse_amount, parse_note};
use rigbook::build::{ComponentSlot, Configuration, is_complete, margin, missing_slots, total_price};
use rigbook::settings::Settings;
use settings::SettingsArgs;
use rigbook::storage::KeyValueStore;
use rigbook::store::{ConfigStore, Persisted};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rigbook")]
#[command(version)]
#[command(about = "Manage PC build configurations and their pricing", long_about = None)]
pub struct Cli {
    /// Data directory (defaults to $RIGBOOK_HOME or the platform data directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List configurations with their totals
    #[clap(visible_alias = "ls")]
    List {
        /// Only show configurations whose name or part names contain this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show every part of one configuration
    Show {
        /// Configuration id or unique id prefix
        id: String,
    },
    /// Create a configuration
    Add {
        /// Display name
        name: String,
        /// Target sale price
        #[arg(short = 't', long, value_parser = parse_amount)]
        sale_target: Option<f64>,
        /// Part as SLOT=NAME@PRICE (repeatable)
        #[arg(short, long = "part", value_name = "SLOT=NAME@PRICE")]
        parts: Vec<String>,
    },
    /// Change an existing configuration
    Edit {
        /// Configuration id or unique id prefix
        id: String,
        /// New display name
        #[arg(short, long)]
        name: Option<String>,
        /// New target sale price
        #[arg(short = 't', long, value_parser = parse_amount)]
        sale_target: Option<f64>,
        /// Part as SLOT=NAME@PRICE, SLOT=NAME or SLOT=@PRICE (repeatable)
        #[arg(short, long = "part", value_name = "SLOT=NAME@PRICE")]
        parts: Vec<String>,
        /// Part note as SLOT=TEXT; an empty TEXT clears it (repeatable)
        #[arg(long = "note", value_name = "SLOT=TEXT")]
        notes: Vec<String>,
    },
    /// Delete a configuration
    #[clap(visible_alias = "rm")]
    Delete {
        /// Configuration id or unique id prefix
        id: String,
    },
    /// Copy a configuration under a new id
    #[clap(visible_alias = "cp")]
    Duplicate {
        /// Configuration id or unique id prefix
        id: String,
    },
    /// Write a configuration to `<name>.json`
    Export {
        /// Configuration id or unique id prefix
        id: String,
        /// Output directory (defaults to the configured export directory)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Add a configuration from an exported JSON file
    Import {
        /// Exported JSON file
        file: PathBuf,
    },
    /// Show aggregate pricing statistics
    Stats,
    /// Show application settings, or change them with flags
    Settings(SettingsArgs),
}

/// Execute one command against the store
pub fn run<S: KeyValueStore>(
    command: Commands,
    store: &mut ConfigStore<S>,
    settings: &Settings,
    data_dir: &Path,
) -> Result<()> {
    match command {
        Commands::List { search } => {
            let configs = store.search(search.as_deref().unwrap_or(""));
            if configs.is_empty() {
                println!("No configurations found");
            }
            for config in configs {
                print_summary(config);
            }
        }
        Commands::Show { id } => {
            let config = store.find_by_prefix(&id)?;
            print_details(config);
        }
        Commands::Add {
            name,
            sale_target,
            parts,
        } => {
            let mut config = Configuration::with_id(store.mint_id(), name);
            if let Some(target) = sale_target {
                config.sale_target = target;
            }
            apply_parts(&mut config, &parts)?;

            let id = config.id;
            saved(store.create(config)?).context("Configuration created but not saved")?;
            println!("Created {id}");
        }
        Commands::Edit {
            id,
            name,
            sale_target,
            parts,
            notes,
        } => {
            let mut config = store.find_by_prefix(&id)?.clone();
            if let Some(name) = name {
                config.name = name;
            }
            if let Some(target) = sale_target {
                config.sale_target = target;
            }
            apply_parts(&mut config, &parts)?;
            for note in &notes {
                let (slot, text) = parse_note(note)?;
                config.component_mut(slot).notes = text;
            }

            let id = config.id;
            saved(store.update(config)).context("Configuration updated but not saved")?;
            println!("Updated {id}");
        }
        Commands::Delete { id } => {
            let id = store.find_by_prefix(&id)?.id;
            saved(store.delete(id)).context("Configuration deleted but not saved")?;
            println!("Deleted {id}");
        }
        Commands::Duplicate { id } => {
            let source = store.find_by_prefix(&id)?.clone();
            let copy_id =
                saved(store.duplicate(&source)).context("Configuration copied but not saved")?;
            println!("Created {copy_id} as a copy of {}", source.id);
        }
        Commands::Export { id, out } => {
            let config = store.find_by_prefix(&id)?;
            let file = store.export(config)?;
            let dir = out.unwrap_or_else(|| settings.resolve_export_dir(data_dir));
            let path = file
                .write_to_dir(&dir)
                .with_context(|| format!("Failed to write export to {}", dir.display()))?;
            println!("Exported to {}", path.display());
        }
        Commands::Import { file } => {
            let bytes = std::fs::read(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let id = saved(store.import(&bytes)?).context("Configuration imported but not saved")?;
            println!("Imported {} as {id}", file.display());
        }
        Commands::Stats => {
            let stats = store.statistics();
            println!("Configurations: {}", stats.count);
            println!("Complete:       {}", stats.complete_count);
            println!("Average total:  {:.2}", stats.mean_total);
            println!("Highest total:  {:.2}", stats.max_total);
            println!("Lowest total:   {:.2}", stats.min_total);
        }
        Commands::Settings(args) => {
            let updated = settings::update(args, settings, data_dir)?;
            print_settings(&updated, data_dir);
        }
    }
    Ok(())
}

fn print_settings(settings: &Settings, data_dir: &Path) {
    println!("Data directory:   {}", data_dir.display());
    println!("Storage key:      {}", settings.storage_key);
    println!("Export directory: {}", settings.resolve_export_dir(data_dir).display());
    println!("Log level:        {}", settings.log_level);
    println!("Log files kept:   {}", settings.max_log_files);
}

fn apply_parts(config: &mut Configuration, parts: &[String]) -> Result<()> {
    for part in parts {
        PartSpec::parse(part)?.apply(config);
    }
    Ok(())
}

fn saved<T>(persisted: Persisted<T>) -> Result<T> {
    Ok(persisted.into_result()?)
}

fn short_id(config: &Configuration) -> String {
    config.id.to_string().chars().take(8).collect()
}

fn print_summary(config: &Configuration) {
    let status = if is_complete(config) { "complete" } else { "incomplete" };
    println!(
        "{}  {:<30}  total {:>10.2}  target {:>10.2}  margin {:>10.2}  {}",
        short_id(config),
        config.name,
        total_price(config),
        config.sale_target,
        margin(config),
        status
    );
}

fn print_details(config: &Configuration) {
    println!("{} ({})", config.name, config.id);
    for (slot, component) in config.components() {
        let name = if component.name.is_empty() { "-" } else { component.name.as_str() };
        print!("  {:<14} {:<36} {:>10.2}", slot.label(), name, component.price);
        match &component.notes {
            Some(notes) => println!("  ({notes})"),
            None => println!(),
        }
    }
    println!("  {:<14} {:<36} {:>10.2}", "Total", "", total_price(config));
    println!("  {:<14} {:<36} {:>10.2}", "Sale target", "", config.sale_target);
    println!("  {:<14} {:<36} {:>10.2}", "Margin", "", margin(config));

    if is_complete(config) {
        println!("Complete");
    } else {
        let mut missing: Vec<&str> = missing_slots(config)
            .into_iter()
            .map(ComponentSlot::label)
            .collect();
        if config.sale_target <= 0.0 {
            missing.push("Sale target");
        }
        println!("Incomplete: {} not filled", missing.join(", "));
    }
}
