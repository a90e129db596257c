//! User preferences
//!
//! The persisted state the compiler consumes: the allowlist and the
//! enforcement switch. Stored as JSON by the preference store; the wire
//! keys are camelCase to stay compatible with exported settings files.

use serde::{Deserialize, Serialize};

use crate::config::BlockingConfig;

/// Persisted user preferences.
///
/// Duplicates in `allowed_domains` are tolerated and order is irrelevant
/// to behavior; entries are normalized at compile time, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    /// Raw allowlist entries as entered by the user
    pub allowed_domains: Vec<String>,
    /// Whether blocking is enforced
    pub enabled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            allowed_domains: Vec::new(),
            // A missing flag means enforcement is on
            enabled: true,
        }
    }
}

impl Preferences {
    /// Preferences seeded on first install: the configured default
    /// allowlist with enforcement enabled.
    pub fn seeded(blocking: &BlockingConfig) -> Self {
        Self {
            allowed_domains: blocking.default_allowed.clone(),
            enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_enabled_defaults_to_true() {
        let prefs: Preferences =
            serde_json::from_str(r#"{"allowedDomains": ["github.com"]}"#).unwrap();
        assert!(prefs.enabled);
        assert_eq!(prefs.allowed_domains, vec!["github.com"]);
    }

    #[test]
    fn test_camel_case_wire_format() {
        let prefs = Preferences {
            allowed_domains: vec!["wikipedia.org".to_string()],
            enabled: false,
        };
        let json = serde_json::to_string(&prefs).unwrap();
        assert!(json.contains("allowedDomains"));
        assert!(json.contains("\"enabled\":false"));
    }

    #[test]
    fn test_seeded_uses_configured_defaults() {
        let blocking = BlockingConfig::default();
        let prefs = Preferences::seeded(&blocking);
        assert!(prefs.enabled);
        assert_eq!(prefs.allowed_domains, blocking.default_allowed);
        assert!(!prefs.allowed_domains.is_empty());
    }
}
