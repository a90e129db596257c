//! Config command - configuration and settings management

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use fgate_core::{Config, Preferences};
use fgate_platform::{JsonPreferenceStore, PreferenceStore};
use std::path::PathBuf;
use tracing::info;

/// Config command arguments
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Generate a configuration file with the defaults
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "fgate.toml")]
        output: PathBuf,
    },

    /// Validate a configuration file
    Validate {
        /// Config file to validate
        file: PathBuf,
    },

    /// Export preferences as JSON
    Export,

    /// Import preferences from a JSON file, replacing the current ones
    Import {
        /// Settings file to import
        file: PathBuf,
    },
}

/// Execute config command
pub fn execute(config: &Config, args: ConfigArgs) -> Result<()> {
    match args.action {
        ConfigAction::Show => show_config(config),
        ConfigAction::Generate { output } => generate_config(output),
        ConfigAction::Validate { file } => validate_config(file),
        ConfigAction::Export => export_settings(config),
        ConfigAction::Import { file } => import_settings(config, file),
    }
}

fn show_config(config: &Config) -> Result<()> {
    let toml_str = config.to_toml().context("Failed to serialize config")?;
    println!("{toml_str}");
    Ok(())
}

fn generate_config(output: PathBuf) -> Result<()> {
    let config = Config::default();
    let toml_str = config.to_toml().context("Failed to serialize config")?;

    // Add header comment
    let content = format!(
        "# FocusGate Configuration\n\
         # See documentation for all available options\n\n\
         {toml_str}"
    );

    std::fs::write(&output, content)
        .with_context(|| format!("Failed to write config to {:?}", output))?;

    info!("Generated config file: {:?}", output);
    println!("Configuration file generated: {}", output.display());

    Ok(())
}

fn validate_config(file: PathBuf) -> Result<()> {
    let config =
        Config::load(&file).with_context(|| format!("Failed to load config from {:?}", file))?;

    config
        .validate()
        .context("Configuration validation failed")?;

    println!("Configuration is valid");
    println!("  Redirect path: {}", config.blocking.redirect_path);
    println!("  Reserved domains: {}", config.blocking.reserved_domains.len());
    println!("  Default allowlist: {}", config.blocking.default_allowed.len());
    println!("  Preference file: {}", config.store.path.display());

    Ok(())
}

fn export_settings(config: &Config) -> Result<()> {
    let store = JsonPreferenceStore::new(&config.store.path);
    let prefs = store
        .load()?
        .unwrap_or_else(|| Preferences::seeded(&config.blocking));

    println!("{}", serde_json::to_string_pretty(&prefs)?);
    Ok(())
}

fn import_settings(config: &Config, file: PathBuf) -> Result<()> {
    let content = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read settings from {:?}", file))?;

    let value: serde_json::Value =
        serde_json::from_str(&content).context("Settings file is not valid JSON")?;

    // Same shape check the options page did: allowedDomains must be an
    // array of strings; a missing enabled flag means "on"
    if !value
        .get("allowedDomains")
        .map_or(false, serde_json::Value::is_array)
    {
        bail!("Invalid settings format: 'allowedDomains' must be an array");
    }

    let prefs: Preferences =
        serde_json::from_value(value).context("Settings file does not match expected format")?;

    let store = JsonPreferenceStore::new(&config.store.path);
    store.store(&prefs)?;

    println!(
        "Imported {} allowed domains (blocking {})",
        prefs.allowed_domains.len(),
        if prefs.enabled { "on" } else { "off" }
    );
    Ok(())
}
