//! CLI subcommands

pub mod allow;
pub mod check;
pub mod config;
pub mod rules;
pub mod run;
pub mod toggle;

use anyhow::{Context, Result};
use clap::Subcommand;
use fgate_core::Config;
use std::path::Path;

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the blocking service (default)
    Run(run::RunArgs),

    /// Add a domain to the allowlist
    Allow(allow::AllowArgs),

    /// Remove a domain from the allowlist
    Disallow(allow::DisallowArgs),

    /// Turn blocking on or off
    Toggle(toggle::ToggleArgs),

    /// Show the rule table compiled from current preferences
    Rules(rules::RulesArgs),

    /// Check whether a URL would be blocked
    Check(check::CheckArgs),

    /// Manage configuration and settings
    Config(config::ConfigArgs),
}

/// Default config file looked up when `-c` is not given
const DEFAULT_CONFIG_FILE: &str = "fgate.toml";

/// Load and validate the configuration.
///
/// Priority: explicit `-c` path > `./fgate.toml` if present > defaults.
pub fn load_config(path: Option<&str>) -> Result<Config> {
    let config = if let Some(path) = path {
        Config::load(path).with_context(|| format!("Failed to load config from {path}"))?
    } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
        Config::load(DEFAULT_CONFIG_FILE)
            .with_context(|| format!("Failed to load config from {DEFAULT_CONFIG_FILE}"))?
    } else {
        Config::default()
    };

    config.validate().context("Invalid configuration")?;
    Ok(config)
}
