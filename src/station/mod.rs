//! Station Context
//!
//! Live runtime state of one simulated charging station: identity, timer
//! intervals, EVSE topology and the ConfigurationKey Store. The variable
//! manager consumes this context explicitly; it never reaches for globals.

pub mod store;

use crate::config::SimulatorConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use store::{ConfigurationKeyStore, InMemoryKeyStore, KeyOptions};
use tracing::debug;

/// Operational state reported for the station, an EVSE or a connector
/// (`AvailabilityStateEnumType`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AvailabilityState {
    Available,
    Occupied,
    Reserved,
    Unavailable,
    Faulted,
}

impl AvailabilityState {
    pub const ALL: [AvailabilityState; 5] = [
        AvailabilityState::Available,
        AvailabilityState::Occupied,
        AvailabilityState::Reserved,
        AvailabilityState::Unavailable,
        AvailabilityState::Faulted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityState::Available => "Available",
            AvailabilityState::Occupied => "Occupied",
            AvailabilityState::Reserved => "Reserved",
            AvailabilityState::Unavailable => "Unavailable",
            AvailabilityState::Faulted => "Faulted",
        }
    }
}

/// Nameplate identity reported through the device model
#[derive(Debug, Clone)]
pub struct StationIdentity {
    pub id: String,
    pub vendor_name: String,
    pub model: String,
    pub serial_number: String,
    pub firmware_version: String,
}

impl Default for StationIdentity {
    fn default() -> Self {
        Self {
            id: "CS-SIM-001".to_string(),
            vendor_name: "ChargeSim".to_string(),
            model: "CS-1".to_string(),
            serial_number: "CS1-0000001".to_string(),
            firmware_version: "1.0.0".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Connector {
    pub id: u32,
    pub availability: AvailabilityState,
    pub connector_type: String,
}

impl Connector {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            availability: AvailabilityState::Available,
            connector_type: "cType2".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Evse {
    pub id: u32,
    pub availability: AvailabilityState,
    pub power_w: f64,
    pub connectors: Vec<Connector>,
}

impl Evse {
    pub fn new(id: u32, connector_count: u32) -> Self {
        Self {
            id,
            availability: AvailabilityState::Available,
            power_w: 0.0,
            connectors: (1..=connector_count).map(Connector::new).collect(),
        }
    }
}

/// One simulated charging station
pub struct Station {
    pub identity: StationIdentity,
    /// Heartbeat cadence in seconds
    pub heartbeat_interval: u64,
    /// WebSocket ping cadence in seconds
    pub ws_ping_interval: u64,
    pub availability: AvailabilityState,
    pub evses: BTreeMap<u32, Evse>,
    pub config_keys: Box<dyn ConfigurationKeyStore>,
    heartbeat_restarts: u32,
    ws_ping_restarts: u32,
}

impl Station {
    pub fn new(identity: StationIdentity) -> Self {
        Self {
            identity,
            heartbeat_interval: 60,
            ws_ping_interval: 60,
            availability: AvailabilityState::Available,
            evses: BTreeMap::new(),
            config_keys: Box::new(InMemoryKeyStore::new()),
            heartbeat_restarts: 0,
            ws_ping_restarts: 0,
        }
    }

    /// Build a station from the simulator configuration: identity, timer
    /// intervals, EVSE topology, and the seeded read-only message limits.
    pub fn from_config(cfg: &SimulatorConfig) -> Self {
        let identity = StationIdentity {
            id: cfg.station.id.clone(),
            vendor_name: cfg.station.vendor_name.clone(),
            model: cfg.station.model.clone(),
            serial_number: cfg.station.serial_number.clone(),
            firmware_version: cfg.station.firmware_version.clone(),
        };

        let mut station = Station::new(identity);
        station.heartbeat_interval = cfg.station.heartbeat_interval_secs;
        station.ws_ping_interval = cfg.station.ws_ping_interval_secs;

        for id in 1..=cfg.evse.count {
            station
                .evses
                .insert(id, Evse::new(id, cfg.evse.connectors_per_evse));
        }

        station.seed_message_limits(cfg.limits.items_per_message, cfg.limits.bytes_per_message);
        station
    }

    /// Seed the read-only per-message limit keys the request façade consults.
    /// The keys are instance-scoped registry entries, so the startup
    /// self-check never materializes them on its own.
    pub fn seed_message_limits(&mut self, items_per_message: u32, bytes_per_message: u32) {
        let readonly = KeyOptions {
            readonly: true,
            ..Default::default()
        };
        for flavor in ["GetVariables", "SetVariables", "GetReport"] {
            self.config_keys.add(
                &format!("ItemsPerMessage.{flavor}"),
                &items_per_message.to_string(),
                readonly,
                false,
            );
            self.config_keys.add(
                &format!("BytesPerMessage.{flavor}"),
                &bytes_per_message.to_string(),
                readonly,
                false,
            );
        }
    }

    /// Prefix for log lines concerning this station
    pub fn log_prefix(&self) -> String {
        format!("{} |", self.identity.id)
    }

    /// Request a heartbeat timer restart with the current interval.
    pub fn restart_heartbeat(&mut self) {
        self.heartbeat_restarts += 1;
        debug!(
            station = %self.identity.id,
            interval_secs = self.heartbeat_interval,
            "heartbeat restart requested"
        );
    }

    /// Request a WebSocket ping timer restart with the current interval.
    pub fn restart_web_socket_ping(&mut self) {
        self.ws_ping_restarts += 1;
        debug!(
            station = %self.identity.id,
            interval_secs = self.ws_ping_interval,
            "websocket ping restart requested"
        );
    }

    pub fn heartbeat_restarts(&self) -> u32 {
        self.heartbeat_restarts
    }

    pub fn ws_ping_restarts(&self) -> u32 {
        self.ws_ping_restarts
    }
}

impl Default for Station {
    fn default() -> Self {
        Self::new(StationIdentity::default())
    }
}
