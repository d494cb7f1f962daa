//! rwatson library root.
//! Exposes the CLI parser, the high-level run() function, and the internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod jira;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    use cli::commands;

    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(cli, cfg),
        Commands::Start { .. } => commands::start::handle(&cli.command, cfg),
        Commands::Stop { .. } => commands::stop::handle(&cli.command, cfg),
        Commands::Cancel => commands::cancel::handle(cfg),
        Commands::Status => commands::status::handle(cfg),
        Commands::List { .. } => commands::list::handle(&cli.command, cfg),
        Commands::Remove { .. } => commands::remove::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
        Commands::Jira { .. } => commands::jira::handle(&cli.command, cfg),
    }
}

/// Load the configuration once: `--config` if given, the default file otherwise.
pub fn load_config(cli: &Cli) -> AppResult<Config> {
    let mut cfg = match &cli.config {
        Some(path) => Config::load_from(&Config::resolve_path(Some(path.as_str())))?,
        None => Config::load()?,
    };

    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::expand_tilde(custom_db)
            .to_string_lossy()
            .to_string();
    }

    Ok(cfg)
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // `init` creates the config file, so it must not require one.
    if matches!(cli.command, Commands::Init) {
        return dispatch(&cli, &Config::default());
    }

    let cfg = load_config(&cli)?;
    dispatch(&cli, &cfg)
}
