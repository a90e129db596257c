//! Toggle command - enforcement switch

use anyhow::Result;
use clap::{Args, ValueEnum};
use fgate_core::{Config, Preferences};
use fgate_platform::{JsonPreferenceStore, PreferenceStore};

/// Toggle command arguments
#[derive(Args, Debug)]
pub struct ToggleArgs {
    /// Desired enforcement state
    #[arg(value_enum)]
    pub state: ToggleState,
}

/// Enforcement states
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ToggleState {
    /// Enable blocking
    On,
    /// Disable blocking
    Off,
}

/// Execute the toggle command
pub fn execute(config: &Config, args: ToggleArgs) -> Result<()> {
    let store = JsonPreferenceStore::new(&config.store.path);
    let mut prefs = store
        .load()?
        .unwrap_or_else(|| Preferences::seeded(&config.blocking));

    let enabled = args.state == ToggleState::On;
    if prefs.enabled == enabled {
        println!("Blocking already {}", if enabled { "on" } else { "off" });
        return Ok(());
    }

    prefs.enabled = enabled;
    store.store(&prefs)?;

    println!("Blocking turned {}", if enabled { "on" } else { "off" });
    Ok(())
}
