//! Collaborator traits for preference storage and rule application
//!
//! These traits define the seams the update handler talks through, so the
//! core compilation logic never touches a concrete backend directly.

use fgate_core::prefs::Preferences;
use fgate_core::rules::{Rule, RuleId};
use tokio::sync::watch;

use crate::Result;

/// Key-value persistence for user preferences
///
/// Shared between the update handler and whatever user-facing surface
/// edits the allowlist. Implementations must notify subscribers on every
/// successful write.
pub trait PreferenceStore: Send + Sync {
    /// Load the persisted preferences, or `None` when nothing has been
    /// stored yet (fresh install).
    fn load(&self) -> Result<Option<Preferences>>;

    /// Persist new preferences and notify subscribers.
    fn store(&self, prefs: &Preferences) -> Result<()>;

    /// Subscribe to change notifications.
    ///
    /// The carried value is a generation counter; its absolute value is
    /// meaningless, only the change matters.
    fn subscribe(&self) -> watch::Receiver<u64>;
}

/// Declarative rule table
///
/// The engine evaluates installed rules against navigations on its own;
/// this subsystem only ever replaces table contents and lists them for
/// diagnostics.
pub trait RuleEngine: Send + Sync {
    /// Atomically remove `remove` and install `add` as one table swap.
    ///
    /// Callers observe either the old table or the new one, never an
    /// intermediate state. On error the table is left untouched.
    fn replace(&self, remove: &[RuleId], add: Vec<Rule>) -> Result<()>;

    /// Snapshot of the currently installed rules.
    fn rules(&self) -> Result<Vec<Rule>>;
}
