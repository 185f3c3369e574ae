use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Top-level simulator configuration
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SimulatorConfig {
    #[validate(nested)]
    #[serde(default)]
    pub station: StationSettings,

    #[validate(nested)]
    #[serde(default)]
    pub evse: EvseSettings,

    #[validate(nested)]
    #[serde(default)]
    pub limits: MessageLimitSettings,
}

/// Station identity and timer defaults
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct StationSettings {
    #[validate(length(min = 1, max = 48))]
    #[serde(default = "default_station_id")]
    pub id: String,

    #[validate(length(min = 1, max = 50))]
    #[serde(default = "default_vendor_name")]
    pub vendor_name: String,

    #[validate(length(min = 1, max = 20))]
    #[serde(default = "default_model")]
    pub model: String,

    #[validate(length(min = 1, max = 25))]
    #[serde(default = "default_serial_number")]
    pub serial_number: String,

    #[validate(length(min = 1, max = 50))]
    #[serde(default = "default_firmware_version")]
    pub firmware_version: String,

    #[validate(range(min = 1, max = 86400))]
    #[serde(default = "default_heartbeat_interval_secs")]
    pub heartbeat_interval_secs: u64,

    #[validate(range(min = 0, max = 86400))]
    #[serde(default = "default_ws_ping_interval_secs")]
    pub ws_ping_interval_secs: u64,
}

/// EVSE topology
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct EvseSettings {
    #[validate(range(min = 0, max = 8))]
    #[serde(default = "default_evse_count")]
    pub count: u32,

    #[validate(range(min = 1, max = 4))]
    #[serde(default = "default_connectors_per_evse")]
    pub connectors_per_evse: u32,
}

/// Seeds for the read-only per-message limits
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct MessageLimitSettings {
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_items_per_message")]
    pub items_per_message: u32,

    #[validate(range(min = 256, max = 65536))]
    #[serde(default = "default_bytes_per_message")]
    pub bytes_per_message: u32,
}

// Default value functions
fn default_station_id() -> String { "CS-SIM-001".to_string() }
fn default_vendor_name() -> String { "ChargeSim".to_string() }
fn default_model() -> String { "CS-1".to_string() }
fn default_serial_number() -> String { "CS1-0000001".to_string() }
fn default_firmware_version() -> String { "1.0.0".to_string() }
fn default_heartbeat_interval_secs() -> u64 { 60 }
fn default_ws_ping_interval_secs() -> u64 { 60 }
fn default_evse_count() -> u32 { 2 }
fn default_connectors_per_evse() -> u32 { 1 }
fn default_items_per_message() -> u32 { 10 }
fn default_bytes_per_message() -> u32 { 8192 }

impl Default for StationSettings {
    fn default() -> Self {
        Self {
            id: default_station_id(),
            vendor_name: default_vendor_name(),
            model: default_model(),
            serial_number: default_serial_number(),
            firmware_version: default_firmware_version(),
            heartbeat_interval_secs: default_heartbeat_interval_secs(),
            ws_ping_interval_secs: default_ws_ping_interval_secs(),
        }
    }
}

impl Default for EvseSettings {
    fn default() -> Self {
        Self {
            count: default_evse_count(),
            connectors_per_evse: default_connectors_per_evse(),
        }
    }
}

impl Default for MessageLimitSettings {
    fn default() -> Self {
        Self {
            items_per_message: default_items_per_message(),
            bytes_per_message: default_bytes_per_message(),
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            station: StationSettings::default(),
            evse: EvseSettings::default(),
            limits: MessageLimitSettings::default(),
        }
    }
}

impl SimulatorConfig {
    /// Load configuration from `config/station.toml` overridden by
    /// environment variables with the `CSSIM__` prefix
    /// (`CSSIM__STATION__ID -> station.id`).
    pub fn load() -> Result<Self> {
        let config: SimulatorConfig = Figment::new()
            .merge(Toml::file("config/station.toml"))
            .merge(Env::prefixed("CSSIM__").split("__"))
            .extract()
            .context("Failed to parse simulator configuration")?;

        config
            .validate()
            .context("Simulator configuration validation failed")?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = SimulatorConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.station.heartbeat_interval_secs, 60);
        assert_eq!(cfg.evse.count, 2);
    }

    #[test]
    fn test_invalid_evse_count_rejected() {
        let mut cfg = SimulatorConfig::default();
        cfg.evse.count = 99;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_limits_deserialization() {
        let json = r#"{"limits": {"items_per_message": 4, "bytes_per_message": 1024}}"#;
        let cfg: SimulatorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.limits.items_per_message, 4);
        assert_eq!(cfg.limits.bytes_per_message, 1024);
    }
}
