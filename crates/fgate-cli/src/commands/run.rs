//! Run command - main blocking service

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use fgate_core::rules::{compile, RuleUpdate};
use fgate_core::{Config, Preferences};
use fgate_platform::{JsonPreferenceStore, MemoryRuleEngine, PreferenceStore};
use fgate_service::{spawn_change_forwarder, spawn_file_watcher, Updater};
use tokio::sync::mpsc;
use tracing::info;

/// Run command arguments
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Compile and print the rule without applying it
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the run command
pub fn execute(config: Config, args: RunArgs) -> Result<()> {
    if args.dry_run {
        return dry_run(&config);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(serve(config))
}

/// Compile the current preferences and print the outcome without touching
/// any rule table
fn dry_run(config: &Config) -> Result<()> {
    let store = JsonPreferenceStore::new(&config.store.path);
    let prefs = store
        .load()?
        .unwrap_or_else(|| Preferences::seeded(&config.blocking));

    match compile(&prefs, &config.blocking) {
        RuleUpdate::Clear => {
            println!("Blocking is disabled; the rule table would be cleared.");
        }
        RuleUpdate::Install(rule) => {
            println!("{}", serde_json::to_string_pretty(&rule)?);
        }
    }

    Ok(())
}

async fn serve(config: Config) -> Result<()> {
    let store = Arc::new(JsonPreferenceStore::new(&config.store.path));
    let engine = Arc::new(MemoryRuleEngine::new());

    let (handle, events) = Updater::channel();
    let updater = Updater::new(store.clone(), engine, config.blocking.clone());
    let worker = tokio::spawn(updater.run(events));

    let forwarder = spawn_change_forwarder(store.subscribe(), handle.clone());
    let watcher = spawn_file_watcher(
        store.clone(),
        Duration::from_millis(config.store.poll_interval_ms),
    );

    // Seed defaults if this is a fresh install, then apply
    handle.installed().await?;
    info!(path = %config.store.path.display(), "watching preferences");

    // Wait for Ctrl-C
    let (stop_tx, mut stop_rx) = mpsc::unbounded_channel::<()>();
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    })
    .context("Failed to set signal handler")?;

    stop_rx.recv().await;
    info!("Received interrupt signal, shutting down...");

    watcher.abort();
    forwarder.abort();
    drop(handle);
    let _ = worker.await;

    info!("FocusGate stopped");
    Ok(())
}
