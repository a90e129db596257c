//! Declarative blocking rules
//!
//! The rule model handed to the rule engine, plus the synthesizer that
//! compiles preferences into the desired rule-table contents.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::BlockingConfig;
use crate::domain::ExclusionSet;
use crate::prefs::Preferences;

/// Identifier of a rule in the engine's table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(pub u32);

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The single rule id this subsystem ever installs.
///
/// The rule table holds either no blocking rule (disabled) or exactly one
/// rule with this id (enabled); no other id is ever created here.
pub const BLOCK_RULE_ID: RuleId = RuleId(1);

/// Pattern matching every HTTP(S) URL
const ALL_URLS: &str = "*://*/*";

/// What the engine does when a rule's condition matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleAction {
    /// Redirect the navigation to a local resource path
    Redirect {
        /// Local path of the redirect target
        path: String,
    },
}

/// Request classes a rule condition applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// Top-level frame navigations only; sub-resource loads on blocked
    /// pages are not independently matched
    MainFrame,
}

/// Condition half of a rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCondition {
    /// URL pattern the rule applies to
    pub url_filter: String,
    /// Domains exempted from the rule
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_request_domains: Vec<String>,
    /// Request classes the rule applies to
    pub resource_types: Vec<ResourceType>,
}

/// A declarative condition-action rule evaluated by the rule engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Table identifier, unique within the engine
    pub id: RuleId,
    /// Evaluation priority (higher wins on conflicts)
    pub priority: u32,
    /// Action taken when the condition matches
    pub action: RuleAction,
    /// When the rule applies
    pub condition: RuleCondition,
}

/// Desired rule-table contents compiled from preferences
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleUpdate {
    /// Enforcement is off: every rule this subsystem installed must go
    Clear,
    /// Enforcement is on: the table must contain exactly this rule
    Install(Rule),
}

/// Compile preferences into the desired rule-table contents.
///
/// Pure function: the result depends only on the inputs, so recomputing
/// the same preferences always yields the same update. The apply step is
/// a full replacement, never an incremental patch.
///
/// # Example
///
/// ```rust
/// use fgate_core::config::BlockingConfig;
/// use fgate_core::prefs::Preferences;
/// use fgate_core::rules::{compile, RuleUpdate, BLOCK_RULE_ID};
///
/// let blocking = BlockingConfig::default();
/// let prefs = Preferences {
///     allowed_domains: vec!["wikipedia.org".to_string()],
///     enabled: true,
/// };
///
/// match compile(&prefs, &blocking) {
///     RuleUpdate::Install(rule) => assert_eq!(rule.id, BLOCK_RULE_ID),
///     RuleUpdate::Clear => unreachable!(),
/// }
/// ```
pub fn compile(prefs: &Preferences, blocking: &BlockingConfig) -> RuleUpdate {
    if !prefs.enabled {
        return RuleUpdate::Clear;
    }

    let excluded = ExclusionSet::from_allowlist(&prefs.allowed_domains, &blocking.reserved_domains);

    RuleUpdate::Install(Rule {
        id: BLOCK_RULE_ID,
        priority: 1,
        action: RuleAction::Redirect {
            path: blocking.redirect_path.clone(),
        },
        condition: RuleCondition {
            url_filter: ALL_URLS.to_string(),
            excluded_request_domains: excluded.into_vec(),
            resource_types: vec![ResourceType::MainFrame],
        },
    })
}
