//! # FocusGate Platform
//!
//! Concrete collaborators behind the seams the update handler depends on:
//! preference storage with change notification, and the declarative rule
//! table the compiled rule is installed into.
//!
//! The traits live here (not in core) so core stays a pure library of
//! compilation logic with no runtime dependencies.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod json_store;
mod memory;
mod traits;

pub use error::{Error, Result};
pub use json_store::JsonPreferenceStore;
pub use memory::{MemoryRuleEngine, MemoryStore};
pub use traits::{PreferenceStore, RuleEngine};
