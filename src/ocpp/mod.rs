//! OCPP 2.0.1 Protocol Surface
//!
//! Wire-level types for the Device Model use cases. Transport, framing and
//! envelope validation live with the surrounding OCPP layer.

pub mod messages;
pub mod types;

pub use messages::{
    Component, GetBaseReportRequest, GetBaseReportResponse, GetVariableData, GetVariableResult,
    ReportData, SetVariableData, SetVariableResult, StatusInfo, Variable, VariableAttribute,
    VariableCharacteristics,
};
pub use types::{
    AttributeKind, ComponentName, DataType, GenericDeviceModelStatus, GetVariableStatus,
    Mutability, ReasonCode, ReportBaseKind, SetVariableStatus, ADDITIONAL_INFO_MAX_LENGTH,
    OCPP_VALUE_ABSOLUTE_MAX_LENGTH,
};
