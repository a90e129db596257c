//! # FocusGate Service
//!
//! The reactive half of the compiler: an event channel carrying install
//! and preference-change signals, consumed by a single handler that
//! recomputes and applies the blocking rule for each one.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fgate_core::config::BlockingConfig;
//! use fgate_platform::{MemoryRuleEngine, MemoryStore, PreferenceStore};
//! use fgate_service::{Updater, spawn_change_forwarder};
//!
//! # async fn example() -> fgate_service::Result<()> {
//! let store = Arc::new(MemoryStore::new());
//! let engine = Arc::new(MemoryRuleEngine::new());
//!
//! let (handle, events) = Updater::channel();
//! let updater = Updater::new(store.clone(), engine, BlockingConfig::default());
//!
//! let worker = tokio::spawn(updater.run(events));
//! spawn_change_forwarder(store.subscribe(), handle.clone());
//!
//! handle.installed().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod events;
mod updater;

pub use error::{Error, Result};
pub use events::{Event, Inspect};
pub use updater::{
    spawn_change_forwarder, spawn_file_watcher, Handle, Updater, EVENT_CHANNEL_CAPACITY,
};
