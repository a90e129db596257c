//! In-memory store and engine implementations
//!
//! Used by the running service (the rule table lives in-process) and by
//! tests that need a store without touching the filesystem.

use fgate_core::prefs::Preferences;
use fgate_core::rules::{Rule, RuleId};
use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::trace;

use crate::traits::{PreferenceStore, RuleEngine};
use crate::{Error, Result};

/// In-memory preference store
pub struct MemoryStore {
    prefs: RwLock<Option<Preferences>>,
    generation: watch::Sender<u64>,
}

impl MemoryStore {
    /// Create an empty store (fresh-install state)
    pub fn new() -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            prefs: RwLock::new(None),
            generation,
        }
    }

    /// Create a store pre-populated with preferences
    pub fn with_preferences(prefs: Preferences) -> Self {
        let store = Self::new();
        *store.prefs.write() = Some(prefs);
        store
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Result<Option<Preferences>> {
        Ok(self.prefs.read().clone())
    }

    fn store(&self, prefs: &Preferences) -> Result<()> {
        *self.prefs.write() = Some(prefs.clone());
        self.generation.send_modify(|g| *g += 1);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.generation.subscribe()
    }
}

/// In-memory rule table
///
/// Replacement happens in one critical section, so readers observe either
/// the previous table or the new one.
pub struct MemoryRuleEngine {
    table: RwLock<Vec<Rule>>,
}

impl MemoryRuleEngine {
    /// Create an empty rule table
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Vec::new()),
        }
    }
}

impl Default for MemoryRuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEngine for MemoryRuleEngine {
    fn replace(&self, remove: &[RuleId], add: Vec<Rule>) -> Result<()> {
        let mut table = self.table.write();

        // Build the next table before touching the current one so a
        // rejected update leaves it untouched
        let mut next: Vec<Rule> = table
            .iter()
            .filter(|rule| !remove.contains(&rule.id))
            .cloned()
            .collect();

        for rule in add {
            if next.iter().any(|existing| existing.id == rule.id) {
                return Err(Error::engine(format!("duplicate rule id {}", rule.id)));
            }
            next.push(rule);
        }

        trace!(removed = remove.len(), installed = next.len(), "rule table swapped");
        *table = next;
        Ok(())
    }

    fn rules(&self) -> Result<Vec<Rule>> {
        Ok(self.table.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fgate_core::rules::{RuleAction, RuleCondition};

    fn rule(id: u32) -> Rule {
        Rule {
            id: RuleId(id),
            priority: 1,
            action: RuleAction::Redirect {
                path: "/blocked.html".to_string(),
            },
            condition: RuleCondition {
                url_filter: "*://*/*".to_string(),
                excluded_request_domains: Vec::new(),
                resource_types: Vec::new(),
            },
        }
    }

    #[test]
    fn test_store_notifies_subscribers() {
        let store = MemoryStore::new();
        let rx = store.subscribe();
        let before = *rx.borrow();

        store.store(&Preferences::default()).unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow(), before + 1);
    }

    #[test]
    fn test_load_before_store_is_none() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        store.store(&Preferences::default()).unwrap();
        assert!(store.load().unwrap().is_some());
    }

    #[test]
    fn test_replace_removes_then_adds() {
        let engine = MemoryRuleEngine::new();

        engine.replace(&[], vec![rule(1)]).unwrap();
        engine.replace(&[RuleId(1)], vec![rule(1)]).unwrap();

        let rules = engine.rules().unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id, RuleId(1));
    }

    #[test]
    fn test_remove_missing_id_is_harmless() {
        let engine = MemoryRuleEngine::new();
        engine.replace(&[RuleId(1)], vec![rule(1)]).unwrap();
        assert_eq!(engine.rules().unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_id_rejected_without_mutation() {
        let engine = MemoryRuleEngine::new();
        engine.replace(&[], vec![rule(1)]).unwrap();

        let err = engine.replace(&[], vec![rule(1)]).unwrap_err();
        assert!(err.to_string().contains("duplicate rule id 1"));

        // Old table still intact
        assert_eq!(engine.rules().unwrap().len(), 1);
    }

    #[test]
    fn test_clear_all() {
        let engine = MemoryRuleEngine::new();
        engine.replace(&[], vec![rule(1)]).unwrap();
        engine.replace(&[RuleId(1)], Vec::new()).unwrap();
        assert!(engine.rules().unwrap().is_empty());
    }
}
