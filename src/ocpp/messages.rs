//! OCPP 2.0.1 Device Model Message Payloads
//!
//! Request/response structures for the B06/B07/B08 use cases. Envelope
//! framing and JSON-Schema validation happen upstream; these are the already
//! validated payload shapes.

use super::types::{
    AttributeKind, DataType, GenericDeviceModelStatus, GetVariableStatus, Mutability, ReasonCode,
    SetVariableStatus, ADDITIONAL_INFO_MAX_LENGTH,
};
use serde::{Deserialize, Serialize};

/// Protocol-addressable unit of the station
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl Component {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instance: None,
        }
    }

    pub fn with_instance(name: impl Into<String>, instance: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instance: Some(instance.into()),
        }
    }
}

/// A named datum under a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl Variable {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instance: None,
        }
    }

    pub fn with_instance(name: impl Into<String>, instance: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instance: Some(instance.into()),
        }
    }
}

/// Element of the per-item status detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusInfo {
    pub reason_code: ReasonCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

impl StatusInfo {
    /// Build a status info, truncating `additional_info` to the protocol
    /// maximum of 50 characters.
    pub fn new(reason_code: ReasonCode, additional_info: impl Into<String>) -> Self {
        let info: String = additional_info.into();
        let info = info.chars().take(ADDITIONAL_INFO_MAX_LENGTH).collect();
        Self {
            reason_code,
            additional_info: Some(info),
        }
    }

    pub fn bare(reason_code: ReasonCode) -> Self {
        Self {
            reason_code,
            additional_info: None,
        }
    }
}

/// Single item of a `GetVariables` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetVariableData {
    pub component: Component,
    pub variable: Variable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_type: Option<AttributeKind>,
}

/// Single item of a `GetVariables` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetVariableResult {
    pub attribute_status: GetVariableStatus,
    pub component: Component,
    pub variable: Variable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_type: Option<AttributeKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_status_info: Option<StatusInfo>,
}

/// Single item of a `SetVariables` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetVariableData {
    pub component: Component,
    pub variable: Variable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_type: Option<AttributeKind>,
    pub attribute_value: String,
}

/// Single item of a `SetVariables` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetVariableResult {
    pub attribute_status: SetVariableStatus,
    pub component: Component,
    pub variable: Variable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_type: Option<AttributeKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_status_info: Option<StatusInfo>,
}

/// `GetBaseReport` request
///
/// `report_base` is kept as a raw string so unknown inventory names can be
/// answered with `NotSupported` instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBaseReportRequest {
    pub request_id: i64,
    pub report_base: String,
}

/// `GetBaseReport` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBaseReportResponse {
    pub status: GenericDeviceModelStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_info: Option<StatusInfo>,
}

/// Fixed characteristics of a reported variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableCharacteristics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub data_type: DataType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values_list: Option<String>,
    pub supports_monitoring: bool,
}

/// One attribute row of a reported variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableAttribute {
    #[serde(rename = "type")]
    pub kind: AttributeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mutability: Option<Mutability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persistent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constant: Option<bool>,
}

/// One entry of a `NotifyReport` inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub component: Component,
    pub variable: Variable,
    pub variable_attribute: Vec<VariableAttribute>,
    pub variable_characteristics: VariableCharacteristics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_variable_data_serialization() {
        let item = GetVariableData {
            component: Component::named("OCPPCommCtrlr"),
            variable: Variable::named("HeartbeatInterval"),
            attribute_type: None,
        };

        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"component\":{\"name\":\"OCPPCommCtrlr\"}"));
        assert!(!json.contains("attributeType"));
    }

    #[test]
    fn test_status_info_truncates_additional_info() {
        let info = StatusInfo::new(ReasonCode::InvalidValue, "x".repeat(80));
        assert_eq!(info.additional_info.unwrap().len(), 50);
    }

    #[test]
    fn test_variable_attribute_type_field_name() {
        let attr = VariableAttribute {
            kind: AttributeKind::Actual,
            value: Some("60".to_string()),
            mutability: Some(Mutability::ReadWrite),
            persistent: Some(true),
            constant: Some(false),
        };

        let json = serde_json::to_string(&attr).unwrap();
        assert!(json.contains("\"type\":\"Actual\""));
        assert!(json.contains("\"mutability\":\"ReadWrite\""));
    }

    #[test]
    fn test_get_base_report_request_accepts_unknown_base() {
        let json = r#"{"requestId":4,"reportBase":"UnsupportedReportBase"}"#;
        let req: GetBaseReportRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.report_base, "UnsupportedReportBase");
    }
}
