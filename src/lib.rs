//! worktrack library root.
//! Exposes the CLI parser, the high-level run() function and the
//! synchronisation / ingestion modules.

pub mod calendar;
pub mod cli;
pub mod config;
pub mod db;
pub mod errors;
pub mod ingest;
pub mod models;
pub mod remote;
pub mod sessions;
pub mod store;
pub mod sync;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
        Commands::Item { .. } => commands::item::handle(&cli.command, cfg),
        Commands::Session { .. } => commands::session::handle(&cli.command, cfg),
        Commands::Owner { .. } => commands::owner::handle(&cli.command, cfg),
        Commands::Import { .. } => commands::import::handle(&cli.command, cfg),
        Commands::Summary => commands::summary::handle(&cli.command, cfg),
        Commands::Sync { .. } => commands::sync::handle(&cli.command, cfg),
        Commands::Load { .. } => commands::load::handle(&cli.command, cfg),
        Commands::Panel { .. } => commands::panel::handle(&cli.command, cfg),
    }
}

/// Apply the global command-line overrides on top of the loaded config.
pub fn apply_overrides(cli: &Cli, mut cfg: Config) -> Config {
    if let Some(db) = &cli.db {
        cfg.database = db.clone();
    }
    cfg.sheet_id = remote::resolve_location(cli.sheet.as_deref(), &cfg);
    if let Some(dir) = &cli.sheets_dir {
        cfg.sheets_dir = dir.clone();
    }
    if let Some(cal) = &cli.calendar {
        cfg.calendar = Some(cal.clone());
    }
    cfg
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let cfg = apply_overrides(&cli, Config::load()?);
    dispatch(&cli, &cfg)
}
