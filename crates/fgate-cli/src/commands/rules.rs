//! Rules command - diagnostic view of the compiled rule table
//!
//! Spins up the update handler against an in-memory engine, applies the
//! current preferences once, and answers through the same diagnostic
//! channel a live service exposes.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use fgate_core::rules::RuleAction;
use fgate_core::Config;
use fgate_platform::{JsonPreferenceStore, MemoryRuleEngine};
use fgate_service::Updater;

/// Rules command arguments
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Print the raw rule objects as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the rules command
pub fn execute(config: Config, args: RulesArgs) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(async {
        let store = Arc::new(JsonPreferenceStore::new(&config.store.path));
        let engine = Arc::new(MemoryRuleEngine::new());

        let (handle, events) = Updater::channel();
        let updater = Updater::new(store, engine, config.blocking.clone());
        let worker = tokio::spawn(updater.run(events));

        handle.preferences_changed().await?;
        let rules = handle.active_rules().await?;
        let allowed = handle.allowed_domains().await?;

        drop(handle);
        let _ = worker.await;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&rules)?);
            return Ok(());
        }

        if rules.is_empty() {
            println!("Rule table is empty (blocking is off).");
        } else {
            println!("Rule table ({} rule{}):", rules.len(), plural(rules.len()));
            for rule in &rules {
                let RuleAction::Redirect { path } = &rule.action;
                println!("  #{} priority {} redirect -> {}", rule.id, rule.priority, path);
                println!("     matches {}", rule.condition.url_filter);
                println!(
                    "     except {} domain{}",
                    rule.condition.excluded_request_domains.len(),
                    plural(rule.condition.excluded_request_domains.len())
                );
                for domain in &rule.condition.excluded_request_domains {
                    println!("       {domain}");
                }
            }
        }

        println!();
        println!("Allowed domains ({}):", allowed.len());
        for domain in &allowed {
            println!("  {domain}");
        }

        Ok(())
    })
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
