//! Reactive update handler
//!
//! Consumes events one at a time and runs the full recompute for each:
//! load preferences, expand the allowlist, synthesize the rule, apply it
//! through the engine. No debouncing: recomputation is idempotent and the
//! engine swap is atomic, so back-to-back events are safe, just not
//! optimized.

use std::sync::Arc;
use std::time::Duration;

use fgate_core::config::BlockingConfig;
use fgate_core::prefs::Preferences;
use fgate_core::rules::{self, Rule, RuleId, RuleUpdate, BLOCK_RULE_ID};
use fgate_platform::{JsonPreferenceStore, PreferenceStore, RuleEngine};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::events::{Event, Inspect};
use crate::{Error, Result};

/// Default depth of the event channel
pub const EVENT_CHANNEL_CAPACITY: usize = 32;

/// The update handler: owns the store/engine collaborators and reacts to
/// inbound events until the channel closes.
pub struct Updater {
    store: Arc<dyn PreferenceStore>,
    engine: Arc<dyn RuleEngine>,
    blocking: BlockingConfig,
}

impl Updater {
    /// Create a handler over the given collaborators
    pub fn new(
        store: Arc<dyn PreferenceStore>,
        engine: Arc<dyn RuleEngine>,
        blocking: BlockingConfig,
    ) -> Self {
        Self {
            store,
            engine,
            blocking,
        }
    }

    /// Create the event channel and a [`Handle`] for its sender side
    pub fn channel() -> (Handle, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        (Handle { tx }, rx)
    }

    /// Consume events until every [`Handle`] is dropped.
    ///
    /// Each event runs to completion before the next is taken, which
    /// serializes rule-table replacements on our side. A failed update is
    /// logged and the previously applied table stays as-is; there is no
    /// retry.
    pub async fn run(self, mut rx: mpsc::Receiver<Event>) {
        while let Some(event) = rx.recv().await {
            if let Err(e) = self.handle(event) {
                warn!(error = %e, "update failed, keeping previous rule state");
            }
        }
        debug!("event channel closed, update handler stopping");
    }

    fn handle(&self, event: Event) -> Result<()> {
        match event {
            Event::Installed => self.on_installed(),
            Event::PreferencesChanged => self.recompute(),
            Event::Inspect(query) => self.inspect(query),
        }
    }

    fn on_installed(&self) -> Result<()> {
        if self.store.load()?.is_none() {
            let prefs = Preferences::seeded(&self.blocking);
            self.store.store(&prefs)?;
            info!(
                domains = prefs.allowed_domains.len(),
                "seeded default preferences"
            );
        }
        self.recompute()
    }

    fn current_prefs(&self) -> Result<Preferences> {
        Ok(self
            .store
            .load()?
            .unwrap_or_else(|| Preferences::seeded(&self.blocking)))
    }

    /// Recompute the rule table from the current preferences
    pub fn recompute(&self) -> Result<()> {
        let prefs = self.current_prefs()?;

        match rules::compile(&prefs, &self.blocking) {
            RuleUpdate::Clear => {
                let installed: Vec<RuleId> =
                    self.engine.rules()?.iter().map(|rule| rule.id).collect();
                if installed.is_empty() {
                    debug!("blocking disabled, rule table already empty");
                    return Ok(());
                }
                self.engine.replace(&installed, Vec::new())?;
                info!("blocking disabled, cleared rule table");
            }
            RuleUpdate::Install(rule) => {
                let excluded = rule.condition.excluded_request_domains.len();
                self.engine.replace(&[BLOCK_RULE_ID], vec![rule])?;
                info!(excluded, "installed blocking rule");
            }
        }

        Ok(())
    }

    fn inspect(&self, query: Inspect) -> Result<()> {
        match query {
            Inspect::ActiveRules(reply) => {
                let rules = self.engine.rules()?;
                // The asker may have given up; that is not our problem
                let _ = reply.send(rules);
            }
            Inspect::AllowedDomains(reply) => {
                let prefs = self.current_prefs()?;
                let _ = reply.send(prefs.allowed_domains);
            }
        }
        Ok(())
    }
}

/// Cheaply cloneable sender side of the event channel
#[derive(Clone)]
pub struct Handle {
    tx: mpsc::Sender<Event>,
}

impl Handle {
    /// Deliver the install signal
    pub async fn installed(&self) -> Result<()> {
        self.send(Event::Installed).await
    }

    /// Deliver a preference-change notification
    pub async fn preferences_changed(&self) -> Result<()> {
        self.send(Event::PreferencesChanged).await
    }

    /// Ask for the currently installed rules
    pub async fn active_rules(&self) -> Result<Vec<Rule>> {
        let (reply, response) = oneshot::channel();
        self.send(Event::Inspect(Inspect::ActiveRules(reply))).await?;
        response.await.map_err(|_| Error::HandlerGone)
    }

    /// Ask for the stored allowlist
    pub async fn allowed_domains(&self) -> Result<Vec<String>> {
        let (reply, response) = oneshot::channel();
        self.send(Event::Inspect(Inspect::AllowedDomains(reply)))
            .await?;
        response.await.map_err(|_| Error::HandlerGone)
    }

    async fn send(&self, event: Event) -> Result<()> {
        self.tx.send(event).await.map_err(|_| Error::HandlerGone)
    }
}

/// Forward store change ticks into `PreferencesChanged` events.
///
/// Ends when either side goes away.
pub fn spawn_change_forwarder(mut changes: watch::Receiver<u64>, handle: Handle) -> JoinHandle<()> {
    tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            if handle.preferences_changed().await.is_err() {
                break;
            }
        }
    })
}

/// Periodically check a file-backed store for outside edits.
///
/// Detected changes surface through the store's own change notification,
/// so subscribers (the forwarder above) pick them up. Runs until aborted.
pub fn spawn_file_watcher(store: Arc<JsonPreferenceStore>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if let Err(e) = store.poll_reload() {
                debug!(error = %e, "preference file poll failed");
            }
        }
    })
}
