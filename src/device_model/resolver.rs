//! Value Resolver
//!
//! Computes the current string value of a catalog entry. Sources are tried
//! in a fixed order, stopping at the first non-empty result: live resolve
//! hook, configuration store (with default materialization), runtime
//! override, well-known live fallback. The post-process hook runs on
//! whatever came out, including the empty string.

use super::keys::composite_key;
use super::registry::{config_key_name, VariableMetadata};
use crate::error::DeviceModelError;
use crate::station::store::{ConfigurationKeyStore, KeyOptions};
use crate::station::Station;
use std::collections::HashMap;
use tracing::debug;

/// Fallback sample cadence when `TxUpdatedInterval` was never set
pub const DEFAULT_TX_UPDATED_INTERVAL: u64 = 60;

/// Positive size-control value from the configuration store, if any
pub(crate) fn size_limit(station: &Station, key: &str) -> Option<i64> {
    let entry = station.config_keys.get(key)?;
    entry.value.trim().parse::<i64>().ok().filter(|v| *v > 0)
}

/// Store flags derived from an entry's metadata
pub(crate) fn key_options(meta: &VariableMetadata) -> KeyOptions {
    KeyOptions {
        readonly: meta.is_read_only(),
        visible: None,
        reboot: meta.reboot_required.then_some(true),
    }
}

/// Resolve the current value of `meta`. An empty string means "no value";
/// the manager decides whether that is acceptable for the requested
/// attribute.
pub(crate) fn current_value(
    station: &mut Station,
    meta: &VariableMetadata,
    component_instance: Option<&str>,
    runtime_overrides: &HashMap<String, String>,
) -> Result<String, DeviceModelError> {
    let mut value = String::new();

    if let Some(resolve) = meta.resolve {
        if let Some(live) = resolve(station, component_instance) {
            value = live;
        }
    }

    if value.is_empty() && meta.is_persistent() {
        let key = config_key_name(meta);
        match station.config_keys.get(&key) {
            Some(entry) => value = entry.value,
            None => {
                // Instance-scoped entries materialize on first successful
                // set, not on read.
                if let Some(default) = meta.default_value {
                    if !meta.is_instance_scoped() {
                        debug!(
                            station = %station.identity.id,
                            key,
                            default,
                            "materializing configuration key from default"
                        );
                        station
                            .config_keys
                            .add(&key, default, key_options(meta), false);
                        if let Some(entry) = station.config_keys.get(&key) {
                            value = entry.value;
                        }
                    }
                }
            }
        }
    }

    if value.is_empty() && !meta.is_persistent() {
        let key = composite_key(meta.component, component_instance, meta.variable);
        if let Some(stored) = runtime_overrides.get(&key) {
            value = stored.clone();
        }
    }

    if value.is_empty() {
        if let Some(fallback) = well_known_fallback(station, meta) {
            value = fallback;
        }
    }

    if let Some(post_process) = meta.post_process {
        value = post_process(station, value);
    }

    Ok(value)
}

fn well_known_fallback(station: &Station, meta: &VariableMetadata) -> Option<String> {
    if meta.variable.eq_ignore_ascii_case("HeartbeatInterval") {
        Some(station.heartbeat_interval.to_string())
    } else if meta.variable.eq_ignore_ascii_case("WebSocketPingInterval") {
        Some(station.ws_ping_interval.to_string())
    } else if meta.variable.eq_ignore_ascii_case("TxUpdatedInterval") {
        Some(DEFAULT_TX_UPDATED_INTERVAL.to_string())
    } else {
        None
    }
}
