//! ConfigurationKey Store
//!
//! The persistent key/value bag owned by the station. Lookups are
//! case-insensitive; stored casing is preserved. The store is a trait so the
//! backing can be swapped (memory, file, database) without touching the
//! variable manager.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Store-specific errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("configuration key not found: {0}")]
    KeyNotFound(String),
}

/// One persisted configuration entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationKey {
    pub key: String,
    pub value: String,
    pub readonly: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reboot: Option<bool>,
}

impl ConfigurationKey {
    /// Entries default to visible unless explicitly hidden.
    pub fn is_visible(&self) -> bool {
        self.visible.unwrap_or(true)
    }

    pub fn requires_reboot(&self) -> bool {
        self.reboot.unwrap_or(false)
    }
}

/// Flags attached to an entry on insertion
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyOptions {
    pub readonly: bool,
    pub visible: Option<bool>,
    pub reboot: Option<bool>,
}

/// Read/upsert contract consumed by the variable manager
pub trait ConfigurationKeyStore {
    /// Case-insensitive lookup. Returns a copy of the entry.
    fn get(&self, key: &str) -> Option<ConfigurationKey>;

    /// Insert an entry. When the key already exists (case-insensitively) and
    /// `overwrite` is false the existing entry is left untouched.
    fn add(&mut self, key: &str, value: &str, opts: KeyOptions, overwrite: bool);

    /// Replace the value of an existing entry, preserving its flags and the
    /// original key casing.
    fn set_value(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// All entries in insertion order.
    fn entries(&self) -> Vec<ConfigurationKey>;

    fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// In-memory store used by the simulator
///
/// Insertion order is kept so report generation is deterministic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyStore {
    entries: Vec<ConfigurationKey>,
}

impl InMemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.key.eq_ignore_ascii_case(key))
    }
}

impl ConfigurationKeyStore for InMemoryKeyStore {
    fn get(&self, key: &str) -> Option<ConfigurationKey> {
        self.position(key).map(|i| self.entries[i].clone())
    }

    fn add(&mut self, key: &str, value: &str, opts: KeyOptions, overwrite: bool) {
        match self.position(key) {
            Some(i) => {
                if overwrite {
                    let existing = &mut self.entries[i];
                    existing.value = value.to_string();
                    existing.readonly = opts.readonly;
                    existing.visible = opts.visible;
                    existing.reboot = opts.reboot;
                }
            }
            None => self.entries.push(ConfigurationKey {
                key: key.to_string(),
                value: value.to_string(),
                readonly: opts.readonly,
                visible: opts.visible,
                reboot: opts.reboot,
            }),
        }
    }

    fn set_value(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        match self.position(key) {
            Some(i) => {
                self.entries[i].value = value.to_string();
                Ok(())
            }
            None => Err(StoreError::KeyNotFound(key.to_string())),
        }
    }

    fn entries(&self) -> Vec<ConfigurationKey> {
        self.entries.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut store = InMemoryKeyStore::new();
        store.add("HeartbeatInterval", "60", KeyOptions::default(), false);

        let entry = store.get("heartbeatinterval").unwrap();
        assert_eq!(entry.key, "HeartbeatInterval");
        assert_eq!(entry.value, "60");
    }

    #[test]
    fn test_add_without_overwrite_keeps_existing() {
        let mut store = InMemoryKeyStore::new();
        store.add("TimeSource", "Heartbeat", KeyOptions::default(), false);
        store.add("timesource", "NTP", KeyOptions::default(), false);

        assert_eq!(store.get("TimeSource").unwrap().value, "Heartbeat");
        assert_eq!(store.entries().len(), 1);
    }

    #[test]
    fn test_add_with_overwrite_replaces_value_and_flags() {
        let mut store = InMemoryKeyStore::new();
        store.add("TimeSource", "Heartbeat", KeyOptions::default(), false);
        store.add(
            "TimeSource",
            "NTP",
            KeyOptions {
                readonly: true,
                ..Default::default()
            },
            true,
        );

        let entry = store.get("TimeSource").unwrap();
        assert_eq!(entry.value, "NTP");
        assert!(entry.readonly);
    }

    #[test]
    fn test_set_value_preserves_casing_and_flags() {
        let mut store = InMemoryKeyStore::new();
        store.add(
            "WebSocketPingInterval",
            "60",
            KeyOptions {
                reboot: Some(true),
                ..Default::default()
            },
            false,
        );

        store.set_value("websocketpinginterval", "30").unwrap();
        let entry = store.get("WebSocketPingInterval").unwrap();
        assert_eq!(entry.key, "WebSocketPingInterval");
        assert_eq!(entry.value, "30");
        assert_eq!(entry.reboot, Some(true));
    }

    #[test]
    fn test_set_value_on_missing_key_errors() {
        let mut store = InMemoryKeyStore::new();
        assert!(store.set_value("Nope", "1").is_err());
    }
}
