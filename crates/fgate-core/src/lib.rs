//! # FocusGate Core
//!
//! Platform-independent core library for allowlist-driven navigation
//! blocking.
//!
//! ## Architecture
//!
//! This crate provides:
//! - **Domain handling** - Best-effort normalization and exclusion-set
//!   expansion of user allowlists
//! - **Rule synthesis** - Compilation of preferences into a single
//!   declarative blocking rule
//! - **Preferences** - The persisted allowlist/enabled state
//! - **Configuration** - TOML-based settings
//!
//! ## Example
//!
//! ```rust
//! use fgate_core::config::BlockingConfig;
//! use fgate_core::prefs::Preferences;
//! use fgate_core::rules::{compile, RuleUpdate};
//!
//! let blocking = BlockingConfig::default();
//! let prefs = Preferences::seeded(&blocking);
//!
//! match compile(&prefs, &blocking) {
//!     RuleUpdate::Install(rule) => {
//!         assert!(!rule.condition.excluded_request_domains.is_empty());
//!     }
//!     RuleUpdate::Clear => unreachable!("seeded preferences enable blocking"),
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod domain;
pub mod error;
pub mod prefs;
pub mod rules;

// Re-exports for convenience
pub use config::{BlockingConfig, Config};
pub use domain::{normalize, ExclusionSet};
pub use error::{Error, Result};
pub use prefs::Preferences;
pub use rules::{compile, Rule, RuleId, RuleUpdate, BLOCK_RULE_ID};
