use anyhow::{Context, Result};
use clap::Parser;
use loadctl_config::{ConfigLoader, LoadctlConfig, LogLevel};
use loadctl_logging::{init_logging_from_config, init_simple_tracing};
use std::path::PathBuf;
use tracing::{debug, info};

mod cli;
mod commands;

use cli::{Cli, Commands, ConfigCommands};

/// Load configuration from file or use defaults
fn load_config(config_path: Option<&PathBuf>) -> Result<LoadctlConfig> {
    let config_path = match config_path {
        Some(path) if !path.exists() => {
            eprintln!("Configuration file not found: {:?}. Using defaults.", path);
            None
        }
        other => other,
    };

    ConfigLoader::new()
        .load(config_path)
        .with_context(|| match config_path {
            Some(path) => format!("Failed to load configuration from {:?}", path),
            None => "Failed to load configuration from environment".to_string(),
        })
}

fn init_logging(config: &mut LoadctlConfig, log_level: Option<&String>) -> Result<()> {
    if let Some(level) = log_level {
        match level.parse::<LogLevel>() {
            Ok(level) => config.logging.level = level,
            Err(e) => eprintln!("{}, keeping '{}'", e, config.logging.level),
        }
    }

    match init_logging_from_config(&config.logging) {
        Ok(()) => {
            debug!("Structured logging initialized");
        }
        Err(e) => {
            // Fall back to simple tracing if structured logging fails
            eprintln!(
                "Failed to initialize structured logging: {:#}, falling back to simple tracing",
                e
            );
            init_simple_tracing(config.logging.level.as_str())?;
        }
    }

    Ok(())
}

/// Load configuration and install the tracing subscriber
fn setup(config_path: Option<&PathBuf>, log_level: Option<&String>) -> Result<LoadctlConfig> {
    let mut config = load_config(config_path)?;
    init_logging(&mut config, log_level)?;
    debug!("Configuration loaded: {:?}", config);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            let config = setup(cli.config.as_ref(), cli.log_level.as_ref())?;
            info!("loadctl {} starting", env!("CARGO_PKG_VERSION"));
            commands::serve::serve_command(config, host, port).await
        }
        Commands::Run(args) => {
            let config = setup(cli.config.as_ref(), cli.log_level.as_ref())?;
            commands::run::run_command(config, args).await
        }
        Commands::Config { config_cmd } => match config_cmd {
            ConfigCommands::Validate { config_file } => {
                commands::config::handle_config_validate(&config_file)
            }
            ConfigCommands::Generate { output, force } => {
                commands::config::handle_config_generate(&output, force)
            }
        },
    }
}
