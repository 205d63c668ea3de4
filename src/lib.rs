//! dailytime library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::{Backend, Config};
use errors::AppResult;
use std::path::PathBuf;

/// Configuration file chosen by `--config`, or the platform default.
pub fn config_path(cli: &Cli) -> PathBuf {
    cli.config
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(Config::config_file)
}

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init { .. } => cli::commands::init::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(cli, cfg),
        Commands::Add { .. } => cli::commands::add::handle(&cli.command, cfg),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::Del { .. } => cli::commands::del::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config once
    let mut cfg = Config::load(Some(&config_path(&cli)))?;

    // 3️⃣ command-line overrides
    if let Some(backend) = &cli.backend {
        cfg.backend = Backend::parse(backend)?;
    }
    if let Some(custom_db) = &cli.db {
        cfg.override_store_path(custom_db);
    }

    dispatch(&cli, &cfg)
}
