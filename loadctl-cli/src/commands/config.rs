//! `loadctl config ...`

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use loadctl_config::{ConfigLoader, LoadctlConfig};
use std::fs;
use std::path::Path;
use tracing::info;

/// Load and validate a configuration file
pub fn handle_config_validate(config_file: &Path) -> Result<()> {
    if !config_file.exists() {
        return Err(anyhow!("Configuration file not found: {:?}", config_file));
    }

    match ConfigLoader::new().from_file(config_file) {
        Ok(_) => {
            println!("{} Configuration file is valid", "✓".green());
            Ok(())
        }
        Err(e) => {
            println!("{} Configuration validation failed: {}", "✗".red(), e);
            Err(e).context("Invalid configuration")
        }
    }
}

/// Write the default configuration as YAML
pub fn handle_config_generate(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        return Err(anyhow!(
            "Output file already exists: {:?}. Use --force to overwrite.",
            output
        ));
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Failed to create output directory")?;
    }

    fs::write(output, LoadctlConfig::generate_sample()).context("Failed to write configuration file")?;
    info!("Sample configuration written to {:?}", output);

    println!("{} Configuration generated at: {:?}", "✓".green(), output);
    println!("Validate with: loadctl config validate --config-file {:?}", output);
    Ok(())
}
