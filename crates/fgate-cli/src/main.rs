//! FocusGate CLI
//!
//! Command-line interface for the allowlist-driven navigation blocker.

mod args;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;
use tracing::error;

use args::Args;

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    logging::init(&args)?;

    // Run the main logic
    let result = run(args);

    if let Err(ref e) = result {
        error!("Fatal error: {:#}", e);
    }

    result
}

fn run(args: Args) -> Result<()> {
    let config = commands::load_config(args.config.as_deref())?;

    match args.command {
        Some(commands::Command::Run(run_args)) => {
            if !args.quiet {
                print_banner();
            }
            commands::run::execute(config, run_args)
        }
        Some(commands::Command::Allow(allow_args)) => commands::allow::add(&config, allow_args),
        Some(commands::Command::Disallow(disallow_args)) => {
            commands::allow::remove(&config, disallow_args)
        }
        Some(commands::Command::Toggle(toggle_args)) => {
            commands::toggle::execute(&config, toggle_args)
        }
        Some(commands::Command::Rules(rules_args)) => commands::rules::execute(config, rules_args),
        Some(commands::Command::Check(check_args)) => commands::check::execute(&config, check_args),
        Some(commands::Command::Config(config_args)) => {
            commands::config::execute(&config, config_args)
        }
        None => {
            // Default: run the service
            if !args.quiet {
                print_banner();
            }
            commands::run::execute(config, commands::run::RunArgs::default())
        }
    }
}

fn print_banner() {
    use colored::Colorize;

    println!();
    println!("{} {}", "FocusGate".green().bold(), env!("CARGO_PKG_VERSION").white());
    println!("{}", "Allowlist-driven navigation blocking".cyan());
    println!();
}
