//! Check command - would this URL be blocked?

use anyhow::Result;
use clap::Args;
use fgate_core::domain::host_of;
use fgate_core::{Config, ExclusionSet, Preferences};
use fgate_platform::{JsonPreferenceStore, PreferenceStore};

/// Check command arguments
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// URL or domain to check
    pub url: String,
}

/// Execute the check command
pub fn execute(config: &Config, args: CheckArgs) -> Result<()> {
    let store = JsonPreferenceStore::new(&config.store.path);
    let prefs = store
        .load()?
        .unwrap_or_else(|| Preferences::seeded(&config.blocking));

    let host = host_of(&args.url);
    let verdict = navigation_verdict(&prefs, config, &host);

    match verdict {
        Verdict::Disabled => println!("{host}: allowed (blocking is off)"),
        Verdict::Allowed => println!("{host}: allowed"),
        Verdict::Redirected => println!(
            "{host}: blocked, navigation redirects to {}",
            config.blocking.redirect_path
        ),
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Verdict {
    Disabled,
    Allowed,
    Redirected,
}

fn navigation_verdict(prefs: &Preferences, config: &Config, host: &str) -> Verdict {
    if !prefs.enabled {
        return Verdict::Disabled;
    }

    let excluded = ExclusionSet::from_allowlist(
        &prefs.allowed_domains,
        &config.blocking.reserved_domains,
    );

    if excluded.covers(host) {
        Verdict::Allowed
    } else {
        Verdict::Redirected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs(domains: &[&str], enabled: bool) -> Preferences {
        Preferences {
            allowed_domains: domains.iter().map(ToString::to_string).collect(),
            enabled,
        }
    }

    #[test]
    fn test_allowed_domain_passes() {
        let config = Config::default();
        let prefs = prefs(&["wikipedia.org"], true);

        assert_eq!(
            navigation_verdict(&prefs, &config, "en.wikipedia.org"),
            Verdict::Allowed
        );
        assert_eq!(
            navigation_verdict(&prefs, &config, "example.com"),
            Verdict::Redirected
        );
    }

    #[test]
    fn test_reserved_domains_always_pass() {
        let config = Config::default();
        let prefs = prefs(&[], true);

        assert_eq!(
            navigation_verdict(&prefs, &config, "chrome.google.com"),
            Verdict::Allowed
        );
    }

    #[test]
    fn test_disabled_passes_everything() {
        let config = Config::default();
        let prefs = prefs(&[], false);

        assert_eq!(
            navigation_verdict(&prefs, &config, "example.com"),
            Verdict::Disabled
        );
    }
}
