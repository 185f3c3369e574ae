//! Variable Registry
//!
//! Static catalog of every `(Component, Variable)` tuple this station claims
//! to implement, with the metadata the manager needs to resolve, validate and
//! report each one. The registry is the single authority on the supported
//! protocol surface; anything absent here is `UnknownVariable`.

use crate::ocpp::{AttributeKind, ComponentName, DataType, Mutability};
use crate::station::Station;
use chrono::{SecondsFormat, Utc};

/// Whether a value survives a process restart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    Persistent,
    Volatile,
}

/// Live value source for variables not backed by the configuration store.
/// The second argument is the component instance of the request (EVSE id,
/// `evse.connector` pair).
pub type ResolveFn = fn(&Station, Option<&str>) -> Option<String>;

/// Normalization applied to every resolved value
pub type PostProcessFn = fn(&Station, String) -> String;

/// Catalog entry, immutable after boot
#[derive(Debug, Clone, Copy)]
pub struct VariableMetadata {
    pub component: ComponentName,
    pub variable: &'static str,
    pub instance: Option<&'static str>,
    pub data_type: DataType,
    pub mutability: Mutability,
    pub persistence: Persistence,
    pub attributes: &'static [AttributeKind],
    pub supports_monitoring: bool,
    pub default_value: Option<&'static str>,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub enum_values: &'static [&'static str],
    pub pattern: Option<&'static str>,
    pub unit: Option<&'static str>,
    pub resolve: Option<ResolveFn>,
    pub post_process: Option<PostProcessFn>,
    pub reboot_required: bool,
    pub supports_target: bool,
    /// The configuration key drops the variable instance for entries flagged
    /// here (`MessageAttemptInterval`).
    pub flatten_instance: bool,
}

impl VariableMetadata {
    pub fn is_persistent(&self) -> bool {
        self.persistence == Persistence::Persistent
    }

    pub fn is_write_only(&self) -> bool {
        self.mutability == Mutability::WriteOnly
    }

    pub fn is_read_only(&self) -> bool {
        self.mutability == Mutability::ReadOnly
    }

    pub fn supports_attribute(&self, kind: AttributeKind) -> bool {
        self.attributes.contains(&kind)
    }

    /// Whether materialization in the configuration store is deferred until
    /// the first successful write.
    pub fn is_instance_scoped(&self) -> bool {
        self.instance.is_some()
    }
}

/// Name under which a variable lives in the ConfigurationKey Store:
/// `variable` or `variable.instance` unless the entry flattens its instance.
pub fn config_key_name(meta: &VariableMetadata) -> String {
    match meta.instance {
        Some(instance) if !meta.flatten_instance => format!("{}.{}", meta.variable, instance),
        _ => meta.variable.to_string(),
    }
}

/// Size-control variables allowed to be absent from the store after boot
pub const SIZE_CONTROL_VARIABLES: [&str; 3] =
    ["ConfigurationValueSize", "ValueSize", "ReportingValueSize"];

pub const AVAILABILITY_STATES: &[&str] =
    &["Available", "Occupied", "Reserved", "Unavailable", "Faulted"];

pub const TIME_SOURCES: &[&str] = &[
    "Heartbeat",
    "NTP",
    "GPS",
    "RealTimeClock",
    "MobileNetwork",
    "RadioTimeTransmitter",
];

pub const MEASURANDS: &[&str] = &[
    "Current.Import",
    "Current.Offered",
    "Energy.Active.Import.Register",
    "Frequency",
    "Power.Active.Import",
    "Power.Factor",
    "Power.Offered",
    "SoC",
    "Voltage",
];

pub const TX_START_STOP_POINTS: &[&str] = &[
    "ParkingBayOccupancy",
    "EVConnected",
    "Authorized",
    "DataSigned",
    "PowerPathClosed",
    "EnergyTransfer",
];

const ATTR_ACTUAL: &[AttributeKind] = &[AttributeKind::Actual];
const ATTR_BOUNDED: &[AttributeKind] = &[
    AttributeKind::Actual,
    AttributeKind::MinSet,
    AttributeKind::MaxSet,
];
const ATTR_TARGETED: &[AttributeKind] = &[
    AttributeKind::Actual,
    AttributeKind::Target,
    AttributeKind::MaxSet,
];

// Resolve hooks

fn resolve_station_availability(station: &Station, _instance: Option<&str>) -> Option<String> {
    Some(station.availability.as_str().to_string())
}

fn resolve_model(station: &Station, _instance: Option<&str>) -> Option<String> {
    Some(station.identity.model.clone())
}

fn resolve_vendor_name(station: &Station, _instance: Option<&str>) -> Option<String> {
    Some(station.identity.vendor_name.clone())
}

fn resolve_serial_number(station: &Station, _instance: Option<&str>) -> Option<String> {
    Some(station.identity.serial_number.clone())
}

fn resolve_firmware_version(station: &Station, _instance: Option<&str>) -> Option<String> {
    Some(station.identity.firmware_version.clone())
}

fn resolve_date_time(_station: &Station, _instance: Option<&str>) -> Option<String> {
    Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn resolve_certificate_entries(_station: &Station, _instance: Option<&str>) -> Option<String> {
    // The simulator installs no certificates.
    Some("0".to_string())
}

fn evse_by_instance<'a>(station: &'a Station, instance: Option<&str>) -> Option<&'a crate::station::Evse> {
    let id: u32 = instance?.parse().ok()?;
    station.evses.get(&id)
}

fn resolve_evse_availability(station: &Station, instance: Option<&str>) -> Option<String> {
    evse_by_instance(station, instance).map(|e| e.availability.as_str().to_string())
}

fn resolve_evse_power(station: &Station, instance: Option<&str>) -> Option<String> {
    evse_by_instance(station, instance).map(|e| format!("{:.1}", e.power_w))
}

fn resolve_evse_connector_count(station: &Station, instance: Option<&str>) -> Option<String> {
    evse_by_instance(station, instance).map(|e| e.connectors.len().to_string())
}

fn connector_by_instance<'a>(
    station: &'a Station,
    instance: Option<&str>,
) -> Option<&'a crate::station::Connector> {
    let (evse_id, connector_id) = instance?.split_once('.')?;
    let evse = station.evses.get(&evse_id.parse::<u32>().ok()?)?;
    let connector_id: u32 = connector_id.parse().ok()?;
    evse.connectors.iter().find(|c| c.id == connector_id)
}

fn resolve_connector_availability(station: &Station, instance: Option<&str>) -> Option<String> {
    connector_by_instance(station, instance).map(|c| c.availability.as_str().to_string())
}

fn resolve_connector_type(station: &Station, instance: Option<&str>) -> Option<String> {
    connector_by_instance(station, instance).map(|c| c.connector_type.clone())
}

// Post-process hooks

/// Strip whitespace around comma-separated entries so stored lists read back
/// in canonical form regardless of how they were written.
fn normalize_list(_station: &Station, raw: String) -> String {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

const BASE: VariableMetadata = VariableMetadata {
    component: ComponentName::ChargingStation,
    variable: "",
    instance: None,
    data_type: DataType::String,
    mutability: Mutability::ReadWrite,
    persistence: Persistence::Persistent,
    attributes: ATTR_ACTUAL,
    supports_monitoring: false,
    default_value: None,
    min: None,
    max: None,
    enum_values: &[],
    pattern: None,
    unit: None,
    resolve: None,
    post_process: None,
    reboot_required: false,
    supports_target: false,
    flatten_instance: false,
};

static CATALOG: &[VariableMetadata] = &[
    // AuthCtrlr
    VariableMetadata {
        component: ComponentName::AuthCtrlr,
        variable: "Enabled",
        data_type: DataType::Boolean,
        default_value: Some("true"),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::AuthCtrlr,
        variable: "AuthorizeRemoteStart",
        data_type: DataType::Boolean,
        default_value: Some("true"),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::AuthCtrlr,
        variable: "LocalAuthorizeOffline",
        data_type: DataType::Boolean,
        default_value: Some("false"),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::AuthCtrlr,
        variable: "LocalPreAuthorize",
        data_type: DataType::Boolean,
        default_value: Some("false"),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::AuthCtrlr,
        variable: "OfflineTxForUnknownIdEnabled",
        data_type: DataType::Boolean,
        default_value: Some("false"),
        ..BASE
    },
    // ChargingStation
    VariableMetadata {
        component: ComponentName::ChargingStation,
        variable: "AvailabilityState",
        data_type: DataType::OptionList,
        mutability: Mutability::ReadOnly,
        persistence: Persistence::Volatile,
        supports_monitoring: true,
        enum_values: AVAILABILITY_STATES,
        resolve: Some(resolve_station_availability),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::ChargingStation,
        variable: "Model",
        mutability: Mutability::ReadOnly,
        persistence: Persistence::Volatile,
        resolve: Some(resolve_model),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::ChargingStation,
        variable: "VendorName",
        mutability: Mutability::ReadOnly,
        persistence: Persistence::Volatile,
        resolve: Some(resolve_vendor_name),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::ChargingStation,
        variable: "SerialNumber",
        mutability: Mutability::ReadOnly,
        persistence: Persistence::Volatile,
        resolve: Some(resolve_serial_number),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::ChargingStation,
        variable: "FirmwareVersion",
        mutability: Mutability::ReadOnly,
        persistence: Persistence::Volatile,
        resolve: Some(resolve_firmware_version),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::ChargingStation,
        variable: "SupplyPhases",
        data_type: DataType::Integer,
        mutability: Mutability::ReadOnly,
        attributes: ATTR_BOUNDED,
        default_value: Some("3"),
        min: Some(1),
        max: Some(3),
        ..BASE
    },
    // ClockCtrlr
    VariableMetadata {
        component: ComponentName::ClockCtrlr,
        variable: "DateTime",
        data_type: DataType::DateTime,
        mutability: Mutability::ReadOnly,
        persistence: Persistence::Volatile,
        resolve: Some(resolve_date_time),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::ClockCtrlr,
        variable: "TimeSource",
        data_type: DataType::SequenceList,
        default_value: Some("Heartbeat"),
        enum_values: TIME_SOURCES,
        post_process: Some(normalize_list),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::ClockCtrlr,
        variable: "TimeZone",
        default_value: Some("UTC"),
        pattern: Some("^[A-Za-z0-9_+/-]+$"),
        ..BASE
    },
    // DeviceDataCtrlr
    VariableMetadata {
        component: ComponentName::DeviceDataCtrlr,
        variable: "ConfigurationValueSize",
        data_type: DataType::Integer,
        min: Some(0),
        max: Some(2500),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::DeviceDataCtrlr,
        variable: "ValueSize",
        data_type: DataType::Integer,
        min: Some(0),
        max: Some(2500),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::DeviceDataCtrlr,
        variable: "ReportingValueSize",
        data_type: DataType::Integer,
        min: Some(0),
        max: Some(2500),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::DeviceDataCtrlr,
        variable: "ItemsPerMessage",
        instance: Some("GetVariables"),
        data_type: DataType::Integer,
        mutability: Mutability::ReadOnly,
        min: Some(1),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::DeviceDataCtrlr,
        variable: "ItemsPerMessage",
        instance: Some("SetVariables"),
        data_type: DataType::Integer,
        mutability: Mutability::ReadOnly,
        min: Some(1),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::DeviceDataCtrlr,
        variable: "ItemsPerMessage",
        instance: Some("GetReport"),
        data_type: DataType::Integer,
        mutability: Mutability::ReadOnly,
        min: Some(1),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::DeviceDataCtrlr,
        variable: "BytesPerMessage",
        instance: Some("GetVariables"),
        data_type: DataType::Integer,
        mutability: Mutability::ReadOnly,
        min: Some(1),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::DeviceDataCtrlr,
        variable: "BytesPerMessage",
        instance: Some("SetVariables"),
        data_type: DataType::Integer,
        mutability: Mutability::ReadOnly,
        min: Some(1),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::DeviceDataCtrlr,
        variable: "BytesPerMessage",
        instance: Some("GetReport"),
        data_type: DataType::Integer,
        mutability: Mutability::ReadOnly,
        min: Some(1),
        ..BASE
    },
    // OCPPCommCtrlr
    VariableMetadata {
        component: ComponentName::OcppCommCtrlr,
        variable: "HeartbeatInterval",
        data_type: DataType::Integer,
        attributes: ATTR_BOUNDED,
        default_value: Some("60"),
        min: Some(1),
        max: Some(86400),
        unit: Some("s"),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::OcppCommCtrlr,
        variable: "WebSocketPingInterval",
        data_type: DataType::Integer,
        default_value: Some("60"),
        min: Some(0),
        max: Some(86400),
        unit: Some("s"),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::OcppCommCtrlr,
        variable: "OfflineThreshold",
        data_type: DataType::Integer,
        default_value: Some("300"),
        min: Some(0),
        unit: Some("s"),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::OcppCommCtrlr,
        variable: "MessageTimeout",
        instance: Some("Default"),
        data_type: DataType::Integer,
        default_value: Some("60"),
        min: Some(1),
        unit: Some("s"),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::OcppCommCtrlr,
        variable: "MessageAttempts",
        instance: Some("TransactionEvent"),
        data_type: DataType::Integer,
        default_value: Some("5"),
        min: Some(0),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::OcppCommCtrlr,
        variable: "MessageAttemptInterval",
        instance: Some("TransactionEvent"),
        data_type: DataType::Integer,
        default_value: Some("5"),
        min: Some(0),
        unit: Some("s"),
        flatten_instance: true,
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::OcppCommCtrlr,
        variable: "RetryBackOffRepeatTimes",
        data_type: DataType::Integer,
        default_value: Some("3"),
        min: Some(0),
        ..BASE
    },
    // SampledDataCtrlr
    VariableMetadata {
        component: ComponentName::SampledDataCtrlr,
        variable: "TxUpdatedInterval",
        data_type: DataType::Integer,
        persistence: Persistence::Volatile,
        min: Some(0),
        max: Some(86400),
        unit: Some("s"),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::SampledDataCtrlr,
        variable: "TxStartedMeasurands",
        data_type: DataType::MemberList,
        default_value: Some("Energy.Active.Import.Register"),
        enum_values: MEASURANDS,
        post_process: Some(normalize_list),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::SampledDataCtrlr,
        variable: "TxUpdatedMeasurands",
        data_type: DataType::MemberList,
        default_value: Some("Energy.Active.Import.Register"),
        enum_values: MEASURANDS,
        post_process: Some(normalize_list),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::SampledDataCtrlr,
        variable: "TxEndedMeasurands",
        data_type: DataType::MemberList,
        default_value: Some("Energy.Active.Import.Register"),
        enum_values: MEASURANDS,
        post_process: Some(normalize_list),
        ..BASE
    },
    // SecurityCtrlr
    VariableMetadata {
        component: ComponentName::SecurityCtrlr,
        variable: "SecurityProfile",
        data_type: DataType::Integer,
        mutability: Mutability::ReadOnly,
        default_value: Some("1"),
        min: Some(1),
        max: Some(3),
        ..BASE
    },
    // No default on purpose: stays on the invalid list until provisioned.
    VariableMetadata {
        component: ComponentName::SecurityCtrlr,
        variable: "OrganizationName",
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::SecurityCtrlr,
        variable: "BasicAuthPassword",
        mutability: Mutability::WriteOnly,
        persistence: Persistence::Volatile,
        pattern: Some("^[\\x21-\\x7e]{16,40}$"),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::SecurityCtrlr,
        variable: "CertificateEntries",
        data_type: DataType::Integer,
        mutability: Mutability::ReadOnly,
        persistence: Persistence::Volatile,
        resolve: Some(resolve_certificate_entries),
        ..BASE
    },
    // TxCtrlr
    VariableMetadata {
        component: ComponentName::TxCtrlr,
        variable: "EVConnectionTimeOut",
        data_type: DataType::Integer,
        attributes: ATTR_BOUNDED,
        default_value: Some("120"),
        min: Some(0),
        max: Some(3600),
        unit: Some("s"),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::TxCtrlr,
        variable: "StopTxOnEVSideDisconnect",
        data_type: DataType::Boolean,
        default_value: Some("true"),
        reboot_required: true,
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::TxCtrlr,
        variable: "StopTxOnInvalidId",
        data_type: DataType::Boolean,
        default_value: Some("true"),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::TxCtrlr,
        variable: "TxStartPoint",
        data_type: DataType::MemberList,
        default_value: Some("PowerPathClosed"),
        enum_values: TX_START_STOP_POINTS,
        post_process: Some(normalize_list),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::TxCtrlr,
        variable: "TxStopPoint",
        data_type: DataType::MemberList,
        default_value: Some("EVConnected"),
        enum_values: TX_START_STOP_POINTS,
        post_process: Some(normalize_list),
        ..BASE
    },
    // EVSE
    VariableMetadata {
        component: ComponentName::Evse,
        variable: "AvailabilityState",
        data_type: DataType::OptionList,
        mutability: Mutability::ReadOnly,
        persistence: Persistence::Volatile,
        supports_monitoring: true,
        enum_values: AVAILABILITY_STATES,
        resolve: Some(resolve_evse_availability),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::Evse,
        variable: "Power",
        data_type: DataType::Decimal,
        mutability: Mutability::ReadOnly,
        persistence: Persistence::Volatile,
        attributes: ATTR_TARGETED,
        max: Some(22000),
        unit: Some("W"),
        resolve: Some(resolve_evse_power),
        supports_target: true,
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::Evse,
        variable: "ConnectorCount",
        data_type: DataType::Integer,
        mutability: Mutability::ReadOnly,
        persistence: Persistence::Volatile,
        resolve: Some(resolve_evse_connector_count),
        ..BASE
    },
    // Connector
    VariableMetadata {
        component: ComponentName::Connector,
        variable: "AvailabilityState",
        data_type: DataType::OptionList,
        mutability: Mutability::ReadOnly,
        persistence: Persistence::Volatile,
        supports_monitoring: true,
        enum_values: AVAILABILITY_STATES,
        resolve: Some(resolve_connector_availability),
        ..BASE
    },
    VariableMetadata {
        component: ComponentName::Connector,
        variable: "ConnectorType",
        mutability: Mutability::ReadOnly,
        persistence: Persistence::Volatile,
        resolve: Some(resolve_connector_type),
        ..BASE
    },
];

/// Lookup view over the static catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct VariableRegistry;

impl VariableRegistry {
    pub fn new() -> Self {
        Self
    }

    pub fn entries(&self) -> &'static [VariableMetadata] {
        CATALOG
    }

    fn find(
        &self,
        component: ComponentName,
        variable: &str,
        instance: Option<&str>,
    ) -> Option<&'static VariableMetadata> {
        CATALOG.iter().find(|m| {
            m.component == component
                && m.variable.eq_ignore_ascii_case(variable)
                && match (m.instance, instance) {
                    (None, None) => true,
                    (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
                    _ => false,
                }
        })
    }

    /// Metadata for `(component, variable, instance)`, falling back to the
    /// instance-agnostic entry when no instance-specific one exists.
    pub fn lookup(
        &self,
        component: ComponentName,
        variable: &str,
        instance: Option<&str>,
    ) -> Option<&'static VariableMetadata> {
        self.find(component, variable, instance).or_else(|| {
            instance
                .is_some()
                .then(|| self.find(component, variable, None))
                .flatten()
        })
    }

    /// Reverse lookup from a ConfigurationKey name (case-insensitive)
    pub fn lookup_by_key_name(&self, key: &str) -> Option<&'static VariableMetadata> {
        CATALOG
            .iter()
            .find(|m| config_key_name(m).eq_ignore_ascii_case(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_entry_supports_at_least_one_attribute() {
        for meta in CATALOG {
            assert!(
                !meta.attributes.is_empty(),
                "{}/{} has no attributes",
                meta.component,
                meta.variable
            );
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = VariableRegistry::new();
        let meta = registry
            .lookup(ComponentName::AuthCtrlr, "authorizeremotestart", None)
            .unwrap();
        assert_eq!(meta.variable, "AuthorizeRemoteStart");
    }

    #[test]
    fn test_lookup_falls_back_to_instance_agnostic_entry() {
        let registry = VariableRegistry::new();
        let meta = registry
            .lookup(ComponentName::TxCtrlr, "TxStartPoint", Some("1"))
            .unwrap();
        assert!(meta.instance.is_none());
    }

    #[test]
    fn test_lookup_prefers_instance_specific_entry() {
        let registry = VariableRegistry::new();
        let meta = registry
            .lookup(
                ComponentName::DeviceDataCtrlr,
                "ItemsPerMessage",
                Some("setvariables"),
            )
            .unwrap();
        assert_eq!(meta.instance, Some("SetVariables"));
    }

    #[test]
    fn test_config_key_name_carries_instance_unless_flattened() {
        let registry = VariableRegistry::new();

        let items = registry
            .lookup(
                ComponentName::DeviceDataCtrlr,
                "ItemsPerMessage",
                Some("GetVariables"),
            )
            .unwrap();
        assert_eq!(config_key_name(items), "ItemsPerMessage.GetVariables");

        let attempt_interval = registry
            .lookup(
                ComponentName::OcppCommCtrlr,
                "MessageAttemptInterval",
                Some("TransactionEvent"),
            )
            .unwrap();
        assert_eq!(config_key_name(attempt_interval), "MessageAttemptInterval");
    }

    #[test]
    fn test_size_control_variables_are_registered_without_defaults() {
        let registry = VariableRegistry::new();
        for name in SIZE_CONTROL_VARIABLES {
            let meta = registry
                .lookup(ComponentName::DeviceDataCtrlr, name, None)
                .unwrap();
            assert!(meta.default_value.is_none());
            assert!(meta.is_persistent());
        }
    }

    #[test]
    fn test_write_only_entries_are_never_persistent_self_check_candidates() {
        for meta in CATALOG {
            if meta.is_write_only() {
                assert_eq!(meta.persistence, Persistence::Volatile);
            }
        }
    }
}
