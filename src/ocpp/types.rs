//! OCPP 2.0.1 Device Model Enumerations
//!
//! Closed enumerations from the "Device Model" section of the protocol.
//! Serialized spellings must match OCPP 2.0.1 exactly, including the
//! irregular ones (`OCPPCommCtrlr`, `dateTime`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hard upper bound on any variable value the protocol allows on the wire.
pub const OCPP_VALUE_ABSOLUTE_MAX_LENGTH: usize = 2500;

/// Maximum length of `StatusInfo.additionalInfo`.
pub const ADDITIONAL_INFO_MAX_LENGTH: usize = 50;

/// Components this station claims to implement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ComponentName {
    AuthCtrlr,
    ChargingStation,
    ClockCtrlr,
    DeviceDataCtrlr,
    #[serde(rename = "OCPPCommCtrlr")]
    OcppCommCtrlr,
    SampledDataCtrlr,
    SecurityCtrlr,
    TxCtrlr,
    #[serde(rename = "EVSE")]
    Evse,
    Connector,
}

impl ComponentName {
    pub const ALL: [ComponentName; 10] = [
        ComponentName::AuthCtrlr,
        ComponentName::ChargingStation,
        ComponentName::ClockCtrlr,
        ComponentName::DeviceDataCtrlr,
        ComponentName::OcppCommCtrlr,
        ComponentName::SampledDataCtrlr,
        ComponentName::SecurityCtrlr,
        ComponentName::TxCtrlr,
        ComponentName::Evse,
        ComponentName::Connector,
    ];

    /// Protocol spelling of the component name
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentName::AuthCtrlr => "AuthCtrlr",
            ComponentName::ChargingStation => "ChargingStation",
            ComponentName::ClockCtrlr => "ClockCtrlr",
            ComponentName::DeviceDataCtrlr => "DeviceDataCtrlr",
            ComponentName::OcppCommCtrlr => "OCPPCommCtrlr",
            ComponentName::SampledDataCtrlr => "SampledDataCtrlr",
            ComponentName::SecurityCtrlr => "SecurityCtrlr",
            ComponentName::TxCtrlr => "TxCtrlr",
            ComponentName::Evse => "EVSE",
            ComponentName::Connector => "Connector",
        }
    }

    /// Case-insensitive lookup against the supported component set
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute sub-kind of a variable (`AttributeEnumType`)
///
/// `Actual` is the protocol default when the attribute type is omitted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    #[default]
    Actual,
    Target,
    MinSet,
    MaxSet,
}

impl AttributeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Actual => "Actual",
            AttributeKind::Target => "Target",
            AttributeKind::MinSet => "MinSet",
            AttributeKind::MaxSet => "MaxSet",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variable data type (`DataEnumType`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DataType {
    #[serde(rename = "string")]
    String,
    #[serde(rename = "decimal")]
    Decimal,
    #[serde(rename = "integer")]
    Integer,
    #[serde(rename = "dateTime")]
    DateTime,
    #[serde(rename = "boolean")]
    Boolean,
    OptionList,
    SequenceList,
    MemberList,
}

impl DataType {
    /// Whether reports may carry `Target`/`MinSet`/`MaxSet` attribute rows
    /// for variables of this type. Everything else reports `Actual` only.
    pub fn supports_extended_attributes(&self) -> bool {
        matches!(self, DataType::Integer | DataType::Decimal)
    }
}

/// Write access class of a variable
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Mutability {
    ReadOnly,
    ReadWrite,
    WriteOnly,
}

/// Per-item status of a `GetVariables` request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GetVariableStatus {
    Accepted,
    Rejected,
    UnknownComponent,
    UnknownVariable,
    NotSupportedAttributeType,
}

/// Per-item status of a `SetVariables` request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SetVariableStatus {
    Accepted,
    Rejected,
    UnknownComponent,
    UnknownVariable,
    NotSupportedAttributeType,
    RebootRequired,
}

/// Outcome of a `GetBaseReport` request (`GenericDeviceModelStatusEnumType`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GenericDeviceModelStatus {
    Accepted,
    Rejected,
    NotSupported,
    EmptyResultSet,
}

/// Machine-readable rejection reason carried in `StatusInfo.reasonCode`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReasonCode {
    NoError,
    InvalidValue,
    ValueTooLow,
    ValueTooHigh,
    UnsupportedParam,
    ReadOnly,
    WriteOnly,
    NotFound,
    TooLargeElement,
    TooManyElements,
    InternalError,
}

impl ReasonCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::NoError => "NoError",
            ReasonCode::InvalidValue => "InvalidValue",
            ReasonCode::ValueTooLow => "ValueTooLow",
            ReasonCode::ValueTooHigh => "ValueTooHigh",
            ReasonCode::UnsupportedParam => "UnsupportedParam",
            ReasonCode::ReadOnly => "ReadOnly",
            ReasonCode::WriteOnly => "WriteOnly",
            ReasonCode::NotFound => "NotFound",
            ReasonCode::TooLargeElement => "TooLargeElement",
            ReasonCode::TooManyElements => "TooManyElements",
            ReasonCode::InternalError => "InternalError",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inventory shape requested by the central system (`ReportBaseEnumType`)
///
/// Requests carry the report base as a plain string; anything that does not
/// parse here is answered with `NotSupported`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReportBaseKind {
    ConfigurationInventory,
    FullInventory,
    SummaryInventory,
}

impl ReportBaseKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ConfigurationInventory" => Some(ReportBaseKind::ConfigurationInventory),
            "FullInventory" => Some(ReportBaseKind::FullInventory),
            "SummaryInventory" => Some(ReportBaseKind::SummaryInventory),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_name_protocol_spelling() {
        let json = serde_json::to_string(&ComponentName::OcppCommCtrlr).unwrap();
        assert_eq!(json, "\"OCPPCommCtrlr\"");
        let json = serde_json::to_string(&ComponentName::Evse).unwrap();
        assert_eq!(json, "\"EVSE\"");
    }

    #[test]
    fn test_component_name_case_insensitive_parse() {
        assert_eq!(
            ComponentName::parse("authctrlr"),
            Some(ComponentName::AuthCtrlr)
        );
        assert_eq!(
            ComponentName::parse("OCPPCOMMCTRLR"),
            Some(ComponentName::OcppCommCtrlr)
        );
        assert_eq!(ComponentName::parse("FooCtrlr"), None);
    }

    #[test]
    fn test_attribute_kind_default_is_actual() {
        assert_eq!(AttributeKind::default(), AttributeKind::Actual);
    }

    #[test]
    fn test_data_type_spelling() {
        assert_eq!(
            serde_json::to_string(&DataType::DateTime).unwrap(),
            "\"dateTime\""
        );
        assert_eq!(
            serde_json::to_string(&DataType::OptionList).unwrap(),
            "\"OptionList\""
        );
    }

    #[test]
    fn test_report_base_parse_is_exact() {
        assert_eq!(
            ReportBaseKind::parse("FullInventory"),
            Some(ReportBaseKind::FullInventory)
        );
        assert_eq!(ReportBaseKind::parse("fullinventory"), None);
        assert_eq!(ReportBaseKind::parse("UnsupportedReportBase"), None);
    }
}
