//! Allow/disallow commands - allowlist edits
//!
//! Edits go straight to the preference file; a running service picks them
//! up through its file watcher.

use anyhow::{bail, Result};
use clap::Args;
use fgate_core::{normalize, Config, Preferences};
use fgate_platform::{JsonPreferenceStore, PreferenceStore};

/// Allow command arguments
#[derive(Args, Debug)]
pub struct AllowArgs {
    /// Domain to add (scheme and www. prefix are stripped)
    pub domain: String,
}

/// Disallow command arguments
#[derive(Args, Debug)]
pub struct DisallowArgs {
    /// Domain to remove
    pub domain: String,
}

/// Add a domain to the allowlist
pub fn add(config: &Config, args: AllowArgs) -> Result<()> {
    let host = normalize(&args.domain);
    if host.is_empty() {
        bail!("'{}' does not contain a domain", args.domain);
    }

    let store = JsonPreferenceStore::new(&config.store.path);
    let mut prefs = store
        .load()?
        .unwrap_or_else(|| Preferences::seeded(&config.blocking));

    if prefs
        .allowed_domains
        .iter()
        .any(|entry| normalize(entry) == host)
    {
        println!("{host} is already allowed");
        return Ok(());
    }

    prefs.allowed_domains.push(args.domain.trim().to_string());
    store.store(&prefs)?;

    println!(
        "Allowed {host} ({} domains total)",
        prefs.allowed_domains.len()
    );
    Ok(())
}

/// Remove a domain from the allowlist
pub fn remove(config: &Config, args: DisallowArgs) -> Result<()> {
    let host = normalize(&args.domain);
    if host.is_empty() {
        bail!("'{}' does not contain a domain", args.domain);
    }

    let store = JsonPreferenceStore::new(&config.store.path);
    let mut prefs = store
        .load()?
        .unwrap_or_else(|| Preferences::seeded(&config.blocking));

    let before = prefs.allowed_domains.len();
    prefs
        .allowed_domains
        .retain(|entry| normalize(entry) != host);

    if prefs.allowed_domains.len() == before {
        println!("{host} was not in the allowlist");
        return Ok(());
    }

    store.store(&prefs)?;
    println!(
        "Removed {host} ({} domains left)",
        prefs.allowed_domains.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &tempfile::TempDir) -> Config {
        let mut config = Config::default();
        config.store.path = dir.path().join("prefs.json");
        config
    }

    #[test]
    fn test_add_then_remove() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        add(
            &config,
            AllowArgs {
                domain: "https://www.example.com/".to_string(),
            },
        )
        .unwrap();

        let store = JsonPreferenceStore::new(&config.store.path);
        let prefs = store.load().unwrap().unwrap();
        assert!(prefs
            .allowed_domains
            .iter()
            .any(|d| normalize(d) == "example.com"));

        remove(
            &config,
            DisallowArgs {
                domain: "example.com".to_string(),
            },
        )
        .unwrap();

        let prefs = store.load().unwrap().unwrap();
        assert!(!prefs
            .allowed_domains
            .iter()
            .any(|d| normalize(d) == "example.com"));
    }

    #[test]
    fn test_add_duplicate_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        for raw in ["example.com", "www.example.com"] {
            add(
                &config,
                AllowArgs {
                    domain: raw.to_string(),
                },
            )
            .unwrap();
        }

        let store = JsonPreferenceStore::new(&config.store.path);
        let prefs = store.load().unwrap().unwrap();
        let matches = prefs
            .allowed_domains
            .iter()
            .filter(|d| normalize(d) == "example.com")
            .count();
        assert_eq!(matches, 1);
    }

    #[test]
    fn test_blank_domain_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        assert!(add(
            &config,
            AllowArgs {
                domain: "   ".to_string()
            }
        )
        .is_err());
    }
}
