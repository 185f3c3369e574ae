//! End-to-end scenarios against the public device-model surface:
//! a booted station driven only through the request service façade.

use ocpp_device_model::config::SimulatorConfig;
use ocpp_device_model::ocpp::{
    AttributeKind, Component, GenericDeviceModelStatus, GetBaseReportRequest, GetVariableData,
    GetVariableStatus, ReasonCode, ReportBaseKind, SetVariableData, SetVariableStatus, Variable,
};
use ocpp_device_model::station::store::ConfigurationKeyStore;
use ocpp_device_model::{DeviceModelService, Station};

fn booted() -> (DeviceModelService, Station) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let mut service = DeviceModelService::new();
    let mut station = Station::from_config(&SimulatorConfig::default());
    service.bootstrap(&mut station);
    (service, station)
}

fn set_req(component: &str, variable: &str, value: &str) -> SetVariableData {
    SetVariableData {
        component: Component::named(component),
        variable: Variable::named(variable),
        attribute_type: None,
        attribute_value: value.to_string(),
    }
}

fn set_req_attr(
    component: &str,
    variable: &str,
    attr: AttributeKind,
    value: &str,
) -> SetVariableData {
    SetVariableData {
        attribute_type: Some(attr),
        ..set_req(component, variable, value)
    }
}

fn get_req(component: &str, variable: &str) -> GetVariableData {
    GetVariableData {
        component: Component::named(component),
        variable: Variable::named(variable),
        attribute_type: None,
    }
}

#[test]
fn configuration_inventory_on_booted_station_is_accepted() {
    let (mut service, mut station) = booted();

    let response = service.handle_get_base_report(
        &mut station,
        &GetBaseReportRequest {
            request_id: 1,
            report_base: "ConfigurationInventory".to_string(),
        },
    );
    assert_eq!(response.status, GenericDeviceModelStatus::Accepted);

    let report = service.build_base_report(&mut station, ReportBaseKind::ConfigurationInventory);
    assert!(report.iter().any(|entry| {
        entry.component.name == "OCPPCommCtrlr" && entry.variable.name == "HeartbeatInterval"
    }));
}

#[test]
fn unknown_report_base_is_not_supported() {
    let (mut service, mut station) = booted();

    let response = service.handle_get_base_report(
        &mut station,
        &GetBaseReportRequest {
            request_id: 4,
            report_base: "UnsupportedReportBase".to_string(),
        },
    );
    assert_eq!(response.status, GenericDeviceModelStatus::NotSupported);
}

#[test]
fn empty_station_yields_empty_result_set() {
    let mut service = DeviceModelService::new();
    // no bootstrap, no configuration keys, no EVSEs
    let mut station = Station::default();

    let response = service.handle_get_base_report(
        &mut station,
        &GetBaseReportRequest {
            request_id: 5,
            report_base: "ConfigurationInventory".to_string(),
        },
    );
    assert_eq!(response.status, GenericDeviceModelStatus::EmptyResultSet);
}

#[test]
fn full_inventory_truncates_values_to_reporting_value_size() {
    let (mut service, mut station) = booted();

    let results = service.set_variables(
        &mut station,
        &[set_req("DeviceDataCtrlr", "ReportingValueSize", "10")],
    );
    assert_eq!(results[0].attribute_status, SetVariableStatus::Accepted);

    let stored = "Heartbeat,NTP,GPS,RealTimeClock,MobileNetwork,RadioTimeTransmitter";
    let results = service.set_variables(&mut station, &[set_req("ClockCtrlr", "TimeSource", stored)]);
    assert_eq!(results[0].attribute_status, SetVariableStatus::Accepted);

    let report = service.build_base_report(&mut station, ReportBaseKind::FullInventory);
    let time_source = report
        .iter()
        .find(|entry| entry.component.name == "ClockCtrlr" && entry.variable.name == "TimeSource")
        .unwrap();
    let actual = time_source.variable_attribute[0].value.as_deref().unwrap();

    assert_eq!(actual.chars().count(), 10);
    assert!(stored.starts_with(actual));
}

#[test]
fn boolean_write_rejection_carries_exact_detail() {
    let (mut service, mut station) = booted();

    let results = service.set_variables(
        &mut station,
        &[set_req("AuthCtrlr", "AuthorizeRemoteStart", "maybe")],
    );

    assert_eq!(results[0].attribute_status, SetVariableStatus::Rejected);
    let info = results[0].attribute_status_info.clone().unwrap();
    assert_eq!(info.reason_code, ReasonCode::InvalidValue);
    assert_eq!(
        info.additional_info.as_deref(),
        Some("AuthorizeRemoteStart must be \"true\" or \"false\"")
    );
}

#[test]
fn max_set_below_min_set_is_rejected() {
    let (mut service, mut station) = booted();

    let results = service.set_variables(
        &mut station,
        &[set_req_attr(
            "OCPPCommCtrlr",
            "HeartbeatInterval",
            AttributeKind::MinSet,
            "30",
        )],
    );
    assert_eq!(results[0].attribute_status, SetVariableStatus::Accepted);

    let results = service.set_variables(
        &mut station,
        &[set_req_attr(
            "OCPPCommCtrlr",
            "HeartbeatInterval",
            AttributeKind::MaxSet,
            "20",
        )],
    );
    assert_eq!(results[0].attribute_status, SetVariableStatus::Rejected);
    let info = results[0].attribute_status_info.clone().unwrap();
    assert_eq!(info.reason_code, ReasonCode::InvalidValue);
    assert_eq!(info.additional_info.as_deref(), Some("MaxSet lower than MinSet"));
}

#[test]
fn persistent_defaults_are_materialized_at_boot() {
    let (_service, station) = booted();

    for (key, expected) in [
        ("HeartbeatInterval", "60"),
        ("AuthorizeRemoteStart", "true"),
        ("TimeSource", "Heartbeat"),
        ("TxStartPoint", "PowerPathClosed"),
        ("EVConnectionTimeOut", "120"),
    ] {
        let entry = station.config_keys.get(key).unwrap();
        assert_eq!(entry.value, expected, "{key}");
    }
}

#[test]
fn read_only_variable_rejects_actual_writes() {
    let (mut service, mut station) = booted();

    let results = service.set_variables(
        &mut station,
        &[set_req("SecurityCtrlr", "SecurityProfile", "2")],
    );
    assert_eq!(results[0].attribute_status, SetVariableStatus::Rejected);
    assert_eq!(
        results[0]
            .attribute_status_info
            .clone()
            .unwrap()
            .reason_code,
        ReasonCode::ReadOnly
    );
}

#[test]
fn effective_write_limit_is_the_smallest_configured_size() {
    let (mut service, mut station) = booted();

    service.set_variables(
        &mut station,
        &[
            set_req("DeviceDataCtrlr", "ConfigurationValueSize", "20"),
            set_req("DeviceDataCtrlr", "ValueSize", "12"),
        ],
    );

    // 14 characters: above ValueSize, below ConfigurationValueSize
    let results = service.set_variables(
        &mut station,
        &[set_req("ClockCtrlr", "TimeZone", "Europe/Andorra")],
    );
    assert_eq!(results[0].attribute_status, SetVariableStatus::Rejected);
    let info = results[0].attribute_status_info.clone().unwrap();
    assert_eq!(info.reason_code, ReasonCode::TooLargeElement);

    let results = service.set_variables(
        &mut station,
        &[set_req("ClockCtrlr", "TimeZone", "Europe/Oslo")],
    );
    assert_eq!(results[0].attribute_status, SetVariableStatus::Accepted);
}

#[test]
fn set_is_idempotent_and_reboot_is_reported_once() {
    let (mut service, mut station) = booted();

    let results = service.set_variables(
        &mut station,
        &[set_req("TxCtrlr", "StopTxOnEVSideDisconnect", "false")],
    );
    assert_eq!(results[0].attribute_status, SetVariableStatus::RebootRequired);

    let results = service.set_variables(
        &mut station,
        &[set_req("TxCtrlr", "StopTxOnEVSideDisconnect", "false")],
    );
    assert_eq!(results[0].attribute_status, SetVariableStatus::Accepted);
}

#[test]
fn case_insensitive_lookups_resolve_the_same_variable() {
    let (mut service, mut station) = booted();

    let lower = service.get_variables(&mut station, &[get_req("authctrlr", "authorizeremotestart")]);
    let canonical =
        service.get_variables(&mut station, &[get_req("AuthCtrlr", "AuthorizeRemoteStart")]);

    assert_eq!(lower[0].attribute_status, GetVariableStatus::Accepted);
    assert_eq!(lower[0].attribute_value, canonical[0].attribute_value);
    // echoes preserve the requester's casing
    assert_eq!(lower[0].component.name, "authctrlr");
    assert_eq!(canonical[0].component.name, "AuthCtrlr");
}

#[test]
fn heartbeat_write_restarts_the_station_timer() {
    let (mut service, mut station) = booted();

    let results = service.set_variables(
        &mut station,
        &[set_req("OCPPCommCtrlr", "HeartbeatInterval", "30")],
    );
    assert_eq!(results[0].attribute_status, SetVariableStatus::Accepted);
    assert_eq!(station.heartbeat_interval, 30);
    assert_eq!(station.heartbeat_restarts(), 1);

    // subsequent reads see the new value through the store
    let reads = service.get_variables(&mut station, &[get_req("OCPPCommCtrlr", "HeartbeatInterval")]);
    assert_eq!(reads[0].attribute_value.as_deref(), Some("30"));
}

#[test]
fn summary_inventory_is_accepted_and_monitored() {
    let (mut service, mut station) = booted();

    let response = service.handle_get_base_report(
        &mut station,
        &GetBaseReportRequest {
            request_id: 9,
            report_base: "SummaryInventory".to_string(),
        },
    );
    assert_eq!(response.status, GenericDeviceModelStatus::Accepted);

    let report = service.build_base_report(&mut station, ReportBaseKind::SummaryInventory);
    let availability = report
        .iter()
        .find(|entry| {
            entry.component.name == "ChargingStation"
                && entry.variable.name == "AvailabilityState"
        })
        .unwrap();
    assert!(availability.variable_characteristics.supports_monitoring);
}
