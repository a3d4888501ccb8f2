//! Command-line interface definitions.

pub mod data;
pub mod output;
pub mod records;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info};
use sonolight_core::{flush_logging, init_logging, AppConfig, LogLevel, RecordStore};
use std::path::PathBuf;

/// Sonolight - records of a DJ and lighting business, one JSON file per tab.
#[derive(Parser, Debug)]
#[command(name = "sonolight")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the collection files [env: SONOLIGHT_DATA_DIR]
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error) [env: SONOLIGHT_LOG_LEVEL]
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Write rolling log files into this directory [env: SONOLIGHT_LOG_DIR]
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the tabs and their backing files
    Tabs,

    /// List the records of one collection
    List(CollectionArg),

    /// Print one record as JSON
    Show(ShowArgs),

    /// Add a client record
    AddClient(AddClientArgs),

    /// Create every missing collection file as an empty list
    Init,

    /// Load every collection file and report problems
    Check,
}

impl Commands {
    /// Stable command name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tabs => "tabs",
            Self::List(_) => "list",
            Self::Show(_) => "show",
            Self::AddClient(_) => "add-client",
            Self::Init => "init",
            Self::Check => "check",
        }
    }
}

/// Shared argument for commands that target one collection.
#[derive(Parser, Debug)]
pub struct CollectionArg {
    /// Collection name, e.g. `clients` or `accounting_entries`
    pub collection: String,
}

/// Arguments for the `show` subcommand.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Collection name
    pub collection: String,

    /// Record id
    pub id: String,
}

/// Arguments for the `add-client` subcommand.
#[derive(Parser, Debug)]
pub struct AddClientArgs {
    /// Client display name
    pub name: String,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

/// Resolves configuration, starts logging and runs the selected command.
pub fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, log_dir)
            .map_err(anyhow::Error::msg)
            .context("failed to start logging")?;
    }

    let store = RecordStore::from_config(&config);
    let command = cli.command.name();
    let result = match cli.command {
        Commands::Tabs => records::execute_tabs(&store),
        Commands::List(args) => records::execute_list(&store, &args.collection),
        Commands::Show(args) => records::execute_show(&store, &args.collection, &args.id),
        Commands::AddClient(args) => records::execute_add_client(&store, args),
        Commands::Init => data::execute_init(&store),
        Commands::Check => data::execute_check(&store),
    };

    match &result {
        Ok(()) => info!(
            "event=cli_command module=cli status=ok command={} data_dir={}",
            command,
            store.data_dir().display()
        ),
        Err(err) => error!(
            "event=cli_command module=cli status=error command={} error={:#}",
            command, err
        ),
    }
    flush_logging();
    result
}

/// Environment first, then command-line flags.
fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::from_env().context("invalid environment configuration")?;
    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = LogLevel::parse(level)?;
    }
    if let Some(log_dir) = &cli.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    if let Some(log_dir) = config.log_dir.take() {
        config.log_dir = Some(absolute(log_dir)?);
    }
    Ok(config)
}

fn absolute(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    Ok(cwd.join(path))
}
