//! Configuration store.
//!
//! Durable storage of the timer [`Configuration`] and the completed work
//! session counter, plus change notification for interested observers.
//! Storage failures never escape this module: reads fall back to defaults,
//! writes are logged and dropped.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, info, warn};

use super::settings::{Configuration, RawSettingsInput};
use crate::storage::KeyValueStore;

/// Key of the persisted configuration record.
pub const CONFIG_KEY: &str = "pomodoro-config";
/// Key of the persisted completed work session counter.
pub const SESSION_COUNT_KEY: &str = "pomodoro-work-sessions";

type Listener = Rc<dyn Fn(&ConfigStore)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Durable settings and session counter with change notification.
pub struct ConfigStore {
    backend: Rc<dyn KeyValueStore>,
    listeners: Rc<RefCell<Listeners>>,
}

impl ConfigStore {
    /// Create a store on top of a key-value backend.
    pub fn new(backend: Rc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            listeners: Rc::new(RefCell::new(Listeners::default())),
        }
    }

    /// Load the persisted configuration.
    ///
    /// Returns the built-in defaults when nothing is stored or the stored
    /// record is unreadable, malformed or has a field below 1.
    #[must_use]
    pub fn load(&self) -> Configuration {
        let raw = match self.backend.get(CONFIG_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Configuration::default(),
            Err(e) => {
                warn!(error = %e, "Failed to read configuration, using defaults");
                return Configuration::default();
            }
        };

        match serde_json::from_str::<Configuration>(&raw) {
            Ok(config) if config.is_valid() => config,
            Ok(config) => {
                warn!(?config, "Stored configuration has fields below 1, using defaults");
                Configuration::default()
            }
            Err(e) => {
                warn!(error = %e, "Stored configuration is malformed, using defaults");
                Configuration::default()
            }
        }
    }

    /// Validate, persist and broadcast new settings.
    ///
    /// Returns the clamped configuration so the caller can show what was
    /// actually stored. Every subscriber is notified before this returns,
    /// even if persisting failed.
    pub fn save(&self, candidate: &RawSettingsInput) -> Configuration {
        let config = candidate.clamp();

        match serde_json::to_string(&config) {
            Ok(json) => {
                if let Err(e) = self.backend.set(CONFIG_KEY, &json) {
                    warn!(error = %e, "Failed to persist configuration");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize configuration"),
        }

        info!(
            work = config.work_seconds,
            short_break = config.short_break_seconds,
            long_break = config.long_break_seconds,
            sessions_before_long = config.sessions_before_long,
            "Configuration saved"
        );

        self.notify();
        config
    }

    /// Load the completed work session counter (0 when absent).
    #[must_use]
    pub fn load_session_count(&self) -> u64 {
        read_count(self.backend.as_ref())
    }

    /// Persist the completed work session counter.
    pub fn save_session_count(&self, count: u64) {
        write_count(self.backend.as_ref(), count);
    }

    /// Handle giving read/write access to the session counter only.
    #[must_use]
    pub fn session_counter(&self) -> SessionCounter {
        SessionCounter {
            backend: Rc::clone(&self.backend),
        }
    }

    /// Register a change observer.
    ///
    /// The callback receives the store and should [`load`](Self::load) the
    /// new value. It stays registered until the returned handle is dropped.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Self) + 'static,
    {
        let callback: Listener = Rc::new(callback);
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, callback));
        debug!(id, "Configuration observer subscribed");

        Subscription {
            listeners: Rc::downgrade(&self.listeners),
            id,
        }
    }

    /// Number of registered observers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    fn notify(&self) {
        // Snapshot first so callbacks may subscribe or unsubscribe.
        let callbacks: Vec<Listener> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();

        debug!(observers = callbacks.len(), "Broadcasting configuration change");
        for callback in callbacks {
            callback(self);
        }
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("subscribers", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}

/// Registration handle returned by [`ConfigStore::subscribe`].
///
/// Dropping the handle unregisters the observer.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    listeners: Weak<RefCell<Listeners>>,
    id: u64,
}

impl Subscription {
    /// Unregister the observer.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            if let Ok(mut listeners) = listeners.try_borrow_mut() {
                listeners.entries.retain(|(id, _)| *id != self.id);
                debug!(id = self.id, "Configuration observer unsubscribed");
            }
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Read/write access to the persisted session counter.
#[derive(Clone)]
pub struct SessionCounter {
    backend: Rc<dyn KeyValueStore>,
}

impl SessionCounter {
    /// Load the counter (0 when absent or unreadable).
    #[must_use]
    pub fn load(&self) -> u64 {
        read_count(self.backend.as_ref())
    }

    /// Persist the counter, overwriting the previous value.
    pub fn save(&self, count: u64) {
        write_count(self.backend.as_ref(), count);
    }
}

impl std::fmt::Debug for SessionCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCounter").finish_non_exhaustive()
    }
}

fn read_count(backend: &dyn KeyValueStore) -> u64 {
    match backend.get(SESSION_COUNT_KEY) {
        Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(value = %raw.trim(), "Stored session count is malformed, using 0");
            0
        }),
        Ok(None) => 0,
        Err(e) => {
            warn!(error = %e, "Failed to read session count, using 0");
            0
        }
    }
}

fn write_count(backend: &dyn KeyValueStore, count: u64) {
    if let Err(e) = backend.set(SESSION_COUNT_KEY, &count.to_string()) {
        warn!(error = %e, count, "Failed to persist session count");
    }
}
