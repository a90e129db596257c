//! Inbound events
//!
//! Everything the update handler reacts to arrives on a single channel:
//! the install signal, preference-change notifications, and diagnostic
//! queries answered out-of-band via oneshot replies.

use fgate_core::rules::Rule;
use tokio::sync::oneshot;

/// Signals delivered to the update handler
#[derive(Debug)]
pub enum Event {
    /// First-run signal: seed default preferences when none are stored,
    /// then compute the rule table
    Installed,
    /// The preference store changed; recompute unconditionally
    PreferencesChanged,
    /// Diagnostic query (debugging surface, not part of the core contract)
    Inspect(Inspect),
}

/// Diagnostic queries
#[derive(Debug)]
pub enum Inspect {
    /// Currently installed rules
    ActiveRules(oneshot::Sender<Vec<Rule>>),
    /// Allowlist entries as stored (raw, un-normalized)
    AllowedDomains(oneshot::Sender<Vec<String>>),
}
