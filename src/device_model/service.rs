//! Request Service Façade
//!
//! Protocol entry point for the device model: batch handling for
//! `GetVariables`/`SetVariables` with the per-message `ItemsPerMessage` and
//! `BytesPerMessage` limits, plus the `GetBaseReport` dispatcher. Internal
//! failures never escape; each one becomes a per-item `InternalError`
//! rejection.

use super::manager::VariableManager;
use super::report;
use super::resolver::size_limit;
use crate::ocpp::{
    GenericDeviceModelStatus, GetBaseReportRequest, GetBaseReportResponse, GetVariableData,
    GetVariableResult, GetVariableStatus, ReasonCode, ReportBaseKind, ReportData, SetVariableData,
    SetVariableResult, SetVariableStatus, StatusInfo,
};
use crate::station::Station;
use serde::Serialize;
use tracing::{error, warn};

/// Estimated UTF-8 size of the serialized array, as counted against
/// `BytesPerMessage`
fn serialized_len<T: Serialize>(items: &T) -> usize {
    serde_json::to_string(items).map(|s| s.len()).unwrap_or(0)
}

fn get_batch_rejection(req: &GetVariableData, info: StatusInfo) -> GetVariableResult {
    GetVariableResult {
        attribute_status: GetVariableStatus::Rejected,
        component: req.component.clone(),
        variable: req.variable.clone(),
        attribute_type: req.attribute_type,
        attribute_value: None,
        attribute_status_info: Some(info),
    }
}

fn set_batch_rejection(req: &SetVariableData, info: StatusInfo) -> SetVariableResult {
    SetVariableResult {
        attribute_status: SetVariableStatus::Rejected,
        component: req.component.clone(),
        variable: req.variable.clone(),
        attribute_type: req.attribute_type,
        attribute_status_info: Some(info),
    }
}

/// Device model entry point held by the OCPP request-handling layer
#[derive(Debug, Default)]
pub struct DeviceModelService {
    manager: VariableManager,
}

impl DeviceModelService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn manager(&mut self) -> &mut VariableManager {
        &mut self.manager
    }

    /// Station boot: run the startup self-check so persistent defaults are
    /// materialized before the first request arrives.
    pub fn bootstrap(&mut self, station: &mut Station) {
        self.manager.validate_persistent_mappings(station);
    }

    /// `GetVariables` (B06): order-preserving, per-item errors stay per-item.
    pub fn get_variables(
        &mut self,
        station: &mut Station,
        items: &[GetVariableData],
    ) -> Vec<GetVariableResult> {
        self.manager.validate_persistent_mappings(station);

        if let Some(limit) = size_limit(station, "ItemsPerMessage.GetVariables") {
            if items.len() > limit as usize {
                warn!(
                    station = %station.identity.id,
                    items = items.len(),
                    limit,
                    "GetVariables request exceeds ItemsPerMessage"
                );
                return items
                    .iter()
                    .map(|req| {
                        get_batch_rejection(
                            req,
                            StatusInfo::new(
                                ReasonCode::TooManyElements,
                                format!("Request exceeds ItemsPerMessage ({limit})"),
                            ),
                        )
                    })
                    .collect();
            }
        }

        let byte_limit = size_limit(station, "BytesPerMessage.GetVariables");
        if let Some(limit) = byte_limit {
            if serialized_len(&items) > limit as usize {
                return items
                    .iter()
                    .map(|req| {
                        get_batch_rejection(
                            req,
                            StatusInfo::new(
                                ReasonCode::TooLargeElement,
                                "Request exceeds BytesPerMessage",
                            ),
                        )
                    })
                    .collect();
            }
        }

        let mut results = Vec::with_capacity(items.len());
        for req in items {
            let result = match self.manager.get_variable(station, req) {
                Ok(result) => result,
                Err(err) => {
                    error!(
                        station = %station.identity.id,
                        variable = %req.variable.name,
                        error = %err,
                        "get variable failed"
                    );
                    get_batch_rejection(
                        req,
                        StatusInfo::new(ReasonCode::InternalError, "Internal error"),
                    )
                }
            };
            results.push(result);
        }

        if let Some(limit) = byte_limit {
            if serialized_len(&results) > limit as usize {
                return items
                    .iter()
                    .map(|req| {
                        get_batch_rejection(
                            req,
                            StatusInfo::new(
                                ReasonCode::TooLargeElement,
                                "Response exceeds BytesPerMessage",
                            ),
                        )
                    })
                    .collect();
            }
        }

        results
    }

    /// `SetVariables` (B06): same batch contract as `get_variables`.
    pub fn set_variables(
        &mut self,
        station: &mut Station,
        items: &[SetVariableData],
    ) -> Vec<SetVariableResult> {
        if let Some(limit) = size_limit(station, "ItemsPerMessage.SetVariables") {
            if items.len() > limit as usize {
                warn!(
                    station = %station.identity.id,
                    items = items.len(),
                    limit,
                    "SetVariables request exceeds ItemsPerMessage"
                );
                return items
                    .iter()
                    .map(|req| {
                        set_batch_rejection(
                            req,
                            StatusInfo::new(
                                ReasonCode::TooManyElements,
                                format!("Request exceeds ItemsPerMessage ({limit})"),
                            ),
                        )
                    })
                    .collect();
            }
        }

        let byte_limit = size_limit(station, "BytesPerMessage.SetVariables");
        if let Some(limit) = byte_limit {
            if serialized_len(&items) > limit as usize {
                return items
                    .iter()
                    .map(|req| {
                        set_batch_rejection(
                            req,
                            StatusInfo::new(
                                ReasonCode::TooLargeElement,
                                "Request exceeds BytesPerMessage",
                            ),
                        )
                    })
                    .collect();
            }
        }

        let mut results = Vec::with_capacity(items.len());
        for req in items {
            let result = match self.manager.set_variable(station, req) {
                Ok(result) => result,
                Err(err) => {
                    error!(
                        station = %station.identity.id,
                        variable = %req.variable.name,
                        error = %err,
                        "set variable failed"
                    );
                    set_batch_rejection(
                        req,
                        StatusInfo::new(ReasonCode::InternalError, "Internal error"),
                    )
                }
            };
            results.push(result);
        }

        if let Some(limit) = byte_limit {
            if serialized_len(&results) > limit as usize {
                return items
                    .iter()
                    .map(|req| {
                        set_batch_rejection(
                            req,
                            StatusInfo::new(
                                ReasonCode::TooLargeElement,
                                "Response exceeds BytesPerMessage",
                            ),
                        )
                    })
                    .collect();
            }
        }

        results
    }

    /// `GetBaseReport` (B08). The generated inventory is delivered
    /// separately via `NotifyReport`; this answers with the report status
    /// only.
    pub fn handle_get_base_report(
        &mut self,
        station: &mut Station,
        req: &GetBaseReportRequest,
    ) -> GetBaseReportResponse {
        let Some(kind) = ReportBaseKind::parse(&req.report_base) else {
            warn!(
                station = %station.identity.id,
                report_base = %req.report_base,
                request_id = req.request_id,
                "unsupported report base"
            );
            return GetBaseReportResponse {
                status: GenericDeviceModelStatus::NotSupported,
                status_info: Some(StatusInfo::new(
                    ReasonCode::UnsupportedParam,
                    format!("Unknown reportBase {}", req.report_base),
                )),
            };
        };

        let report = report::build_base_report(&self.manager, station, kind);
        let status = if report.is_empty() {
            GenericDeviceModelStatus::EmptyResultSet
        } else {
            GenericDeviceModelStatus::Accepted
        };

        GetBaseReportResponse {
            status,
            status_info: None,
        }
    }

    /// The inventory a `handle_get_base_report` answer refers to, for the
    /// `NotifyReport` sender.
    pub fn build_base_report(
        &self,
        station: &mut Station,
        report_base: ReportBaseKind,
    ) -> Vec<ReportData> {
        report::build_base_report(&self.manager, station, report_base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulatorConfig;
    use crate::ocpp::{Component, Variable};
    use crate::station::store::{ConfigurationKeyStore, KeyOptions};

    fn booted() -> (DeviceModelService, Station) {
        let mut service = DeviceModelService::new();
        let mut station = Station::from_config(&SimulatorConfig::default());
        service.bootstrap(&mut station);
        (service, station)
    }

    fn get_req(component: &str, variable: &str) -> GetVariableData {
        GetVariableData {
            component: Component::named(component),
            variable: Variable::named(variable),
            attribute_type: None,
        }
    }

    #[test]
    fn test_batch_preserves_order_and_isolates_failures() {
        let (mut service, mut station) = booted();

        let items = vec![
            get_req("OCPPCommCtrlr", "HeartbeatInterval"),
            get_req("AuthCtrlr", "NoSuchVariable"),
            get_req("AuthCtrlr", "AuthorizeRemoteStart"),
        ];
        let results = service.get_variables(&mut station, &items);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].attribute_status, GetVariableStatus::Accepted);
        assert_eq!(results[0].attribute_value.as_deref(), Some("60"));
        assert_eq!(results[1].attribute_status, GetVariableStatus::UnknownVariable);
        assert_eq!(results[2].attribute_status, GetVariableStatus::Accepted);
        assert_eq!(results[2].attribute_value.as_deref(), Some("true"));
    }

    #[test]
    fn test_get_variables_runs_self_check_first() {
        let mut service = DeviceModelService::new();
        // fresh station, no bootstrap: the batch call must materialize
        // persistent defaults on its own
        let mut station = Station::default();

        let results =
            service.get_variables(&mut station, &[get_req("OCPPCommCtrlr", "HeartbeatInterval")]);
        assert_eq!(results[0].attribute_status, GetVariableStatus::Accepted);
        assert!(station.config_keys.get("TxStartPoint").is_some());
    }

    #[test]
    fn test_too_many_items_rejects_every_item() {
        let (mut service, mut station) = booted();
        station
            .config_keys
            .add("ItemsPerMessage.GetVariables", "2", KeyOptions::default(), true);

        let items = vec![
            get_req("OCPPCommCtrlr", "HeartbeatInterval"),
            get_req("AuthCtrlr", "AuthorizeRemoteStart"),
            get_req("ClockCtrlr", "TimeSource"),
        ];
        let results = service.get_variables(&mut station, &items);

        assert_eq!(results.len(), 3);
        for result in results {
            assert_eq!(result.attribute_status, GetVariableStatus::Rejected);
            assert_eq!(
                result.attribute_status_info.unwrap().reason_code,
                ReasonCode::TooManyElements
            );
        }
    }

    #[test]
    fn test_oversized_request_rejects_every_item() {
        let (mut service, mut station) = booted();
        station
            .config_keys
            .add("BytesPerMessage.GetVariables", "32", KeyOptions::default(), true);

        let items = vec![get_req("OCPPCommCtrlr", "HeartbeatInterval")];
        let results = service.get_variables(&mut station, &items);

        assert_eq!(results[0].attribute_status, GetVariableStatus::Rejected);
        let info = results[0].attribute_status_info.clone().unwrap();
        assert_eq!(info.reason_code, ReasonCode::TooLargeElement);
        assert_eq!(info.additional_info.as_deref(), Some("Request exceeds BytesPerMessage"));
    }

    #[test]
    fn test_oversized_response_is_rechecked_after_execution() {
        let (mut service, mut station) = booted();

        let items = vec![get_req("ClockCtrlr", "TimeSource")];
        // exactly the request size: the request passes, the larger response
        // trips the second check
        let limit = serde_json::to_string(&items.as_slice()).unwrap().len();
        station.config_keys.add(
            "BytesPerMessage.GetVariables",
            &limit.to_string(),
            KeyOptions::default(),
            true,
        );

        let results = service.get_variables(&mut station, &items);
        assert_eq!(results[0].attribute_status, GetVariableStatus::Rejected);
        let info = results[0].attribute_status_info.clone().unwrap();
        assert_eq!(info.reason_code, ReasonCode::TooLargeElement);
        assert_eq!(
            info.additional_info.as_deref(),
            Some("Response exceeds BytesPerMessage")
        );
    }

    #[test]
    fn test_set_variables_applies_its_own_item_limit() {
        let (mut service, mut station) = booted();
        station
            .config_keys
            .add("ItemsPerMessage.SetVariables", "1", KeyOptions::default(), true);

        let items = vec![
            SetVariableData {
                component: Component::named("AuthCtrlr"),
                variable: Variable::named("AuthorizeRemoteStart"),
                attribute_type: None,
                attribute_value: "false".to_string(),
            },
            SetVariableData {
                component: Component::named("AuthCtrlr"),
                variable: Variable::named("LocalPreAuthorize"),
                attribute_type: None,
                attribute_value: "true".to_string(),
            },
        ];
        let results = service.set_variables(&mut station, &items);

        for result in results {
            assert_eq!(result.attribute_status, SetVariableStatus::Rejected);
            assert_eq!(
                result.attribute_status_info.unwrap().reason_code,
                ReasonCode::TooManyElements
            );
        }
        // nothing was written
        assert_eq!(
            station.config_keys.get("AuthorizeRemoteStart").unwrap().value,
            "true"
        );
    }

    #[test]
    fn test_base_report_status_mapping() {
        let (mut service, mut station) = booted();

        let response = service.handle_get_base_report(
            &mut station,
            &GetBaseReportRequest {
                request_id: 1,
                report_base: "ConfigurationInventory".to_string(),
            },
        );
        assert_eq!(response.status, GenericDeviceModelStatus::Accepted);

        let response = service.handle_get_base_report(
            &mut station,
            &GetBaseReportRequest {
                request_id: 4,
                report_base: "UnsupportedReportBase".to_string(),
            },
        );
        assert_eq!(response.status, GenericDeviceModelStatus::NotSupported);

        let mut empty_station = Station::default();
        let response = service.handle_get_base_report(
            &mut empty_station,
            &GetBaseReportRequest {
                request_id: 5,
                report_base: "ConfigurationInventory".to_string(),
            },
        );
        assert_eq!(response.status, GenericDeviceModelStatus::EmptyResultSet);
    }
}
