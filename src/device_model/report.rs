//! Base Report Builder
//!
//! Assembles the `GetBaseReport` inventories from the registry and the
//! manager's live state. The builder only produces the ordered `ReportData`
//! sequence; chunked delivery via `NotifyReport` belongs to the transport
//! layer.

use super::manager::VariableManager;
use super::registry::VariableMetadata;
use super::resolver::size_limit;
use super::keys::enforce_value_size;
use crate::ocpp::{
    AttributeKind, Component, ComponentName, DataType, Mutability, ReportBaseKind, ReportData,
    Variable, VariableAttribute, VariableCharacteristics, OCPP_VALUE_ABSOLUTE_MAX_LENGTH,
};
use crate::station::store::{ConfigurationKey, ConfigurationKeyStore};
use crate::station::Station;
use std::collections::HashSet;
use tracing::warn;

/// Build the requested inventory. The output is deterministic: store entries
/// in insertion order, then catalog order, then EVSE/connector id order.
pub fn build_base_report(
    manager: &VariableManager,
    station: &mut Station,
    report_base: ReportBaseKind,
) -> Vec<ReportData> {
    match report_base {
        ReportBaseKind::ConfigurationInventory => configuration_inventory(manager, station),
        ReportBaseKind::FullInventory => full_inventory(manager, station),
        ReportBaseKind::SummaryInventory => summary_inventory(manager, station),
    }
}

fn dedupe_key(entry: &ReportData) -> String {
    format!(
        "{}|{}|{}|{}",
        entry.component.name.to_ascii_lowercase(),
        entry
            .component
            .instance
            .as_deref()
            .unwrap_or_default()
            .to_ascii_lowercase(),
        entry.variable.name.to_ascii_lowercase(),
        entry
            .variable
            .instance
            .as_deref()
            .unwrap_or_default()
            .to_ascii_lowercase(),
    )
}

fn push_unique(out: &mut Vec<ReportData>, seen: &mut HashSet<String>, entry: ReportData) {
    if seen.insert(dedupe_key(&entry)) {
        out.push(entry);
    }
}

fn reporting_truncate(station: &Station, value: String) -> String {
    let value = match size_limit(station, "ReportingValueSize") {
        Some(limit) => enforce_value_size(value, limit),
        None => value,
    };
    enforce_value_size(value, OCPP_VALUE_ABSOLUTE_MAX_LENGTH as i64)
}

/// One report entry for a catalog variable, with one attribute row per
/// supported attribute. Non-numeric data types report `Actual` only, and
/// write-only values are never disclosed.
fn report_entry(
    manager: &VariableManager,
    station: &mut Station,
    meta: &'static VariableMetadata,
    component_instance: Option<&str>,
) -> ReportData {
    let mut attributes = Vec::new();

    for kind in meta.attributes {
        if *kind != AttributeKind::Actual && !meta.data_type.supports_extended_attributes() {
            continue;
        }

        let value = match kind {
            AttributeKind::Actual | AttributeKind::Target => {
                if meta.is_write_only() {
                    None
                } else {
                    let resolved = manager
                        .resolved_value(station, meta, component_instance)
                        .unwrap_or_else(|err| {
                            warn!(
                                station = %station.identity.id,
                                variable = meta.variable,
                                error = %err,
                                "value resolution failed during report generation"
                            );
                            String::new()
                        });
                    let resolved = reporting_truncate(station, resolved);
                    (!resolved.is_empty()).then_some(resolved)
                }
            }
            AttributeKind::MinSet | AttributeKind::MaxSet => {
                manager.bound_value(meta, component_instance, *kind)
            }
        };

        attributes.push(VariableAttribute {
            kind: *kind,
            value,
            mutability: Some(meta.mutability),
            persistent: Some(meta.is_persistent()),
            constant: Some(false),
        });
    }

    ReportData {
        component: Component {
            name: meta.component.as_str().to_string(),
            instance: component_instance.map(str::to_string),
        },
        variable: Variable {
            name: meta.variable.to_string(),
            instance: meta.instance.map(str::to_string),
        },
        variable_attribute: attributes,
        variable_characteristics: VariableCharacteristics {
            unit: meta.unit.map(str::to_string),
            data_type: meta.data_type,
            min_limit: meta.min.map(|v| v as f64),
            max_limit: meta.max.map(|v| v as f64),
            values_list: (!meta.enum_values.is_empty()).then(|| meta.enum_values.join(",")),
            supports_monitoring: meta.supports_monitoring,
        },
    }
}

/// Report entry for a configuration key with no registry mapping
fn generic_config_entry(station: &Station, entry: &ConfigurationKey) -> ReportData {
    let mutability = if entry.readonly {
        Mutability::ReadOnly
    } else {
        Mutability::ReadWrite
    };

    ReportData {
        component: Component::named(ComponentName::ChargingStation.as_str()),
        variable: Variable::named(entry.key.clone()),
        variable_attribute: vec![VariableAttribute {
            kind: AttributeKind::Actual,
            value: Some(reporting_truncate(station, entry.value.clone())),
            mutability: Some(mutability),
            persistent: Some(true),
            constant: Some(false),
        }],
        variable_characteristics: VariableCharacteristics {
            unit: None,
            data_type: DataType::String,
            min_limit: None,
            max_limit: None,
            values_list: None,
            supports_monitoring: false,
        },
    }
}

fn configuration_entries(
    manager: &VariableManager,
    station: &mut Station,
    out: &mut Vec<ReportData>,
    seen: &mut HashSet<String>,
) {
    for entry in station.config_keys.entries() {
        if !entry.is_visible() {
            continue;
        }
        let report = match manager.registry().lookup_by_key_name(&entry.key) {
            Some(meta) => report_entry(manager, station, meta, None),
            None => generic_config_entry(station, &entry),
        };
        push_unique(out, seen, report);
    }
}

fn configuration_inventory(manager: &VariableManager, station: &mut Station) -> Vec<ReportData> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    configuration_entries(manager, station, &mut out, &mut seen);
    out
}

fn per_evse_entries(
    manager: &VariableManager,
    station: &mut Station,
    out: &mut Vec<ReportData>,
    seen: &mut HashSet<String>,
) {
    let evse_ids: Vec<u32> = station.evses.keys().copied().collect();

    for evse_id in evse_ids {
        let instance = evse_id.to_string();
        for meta in manager.registry().entries() {
            if meta.component == ComponentName::Evse {
                push_unique(out, seen, report_entry(manager, station, meta, Some(&instance)));
            }
        }

        let connector_ids: Vec<u32> = station
            .evses
            .get(&evse_id)
            .map(|evse| evse.connectors.iter().map(|c| c.id).collect())
            .unwrap_or_default();
        for connector_id in connector_ids {
            let instance = format!("{evse_id}.{connector_id}");
            for meta in manager.registry().entries() {
                if meta.component == ComponentName::Connector {
                    push_unique(out, seen, report_entry(manager, station, meta, Some(&instance)));
                }
            }
        }
    }
}

fn full_inventory(manager: &VariableManager, station: &mut Station) -> Vec<ReportData> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();

    configuration_entries(manager, station, &mut out, &mut seen);

    // Whole-station catalog walk; EVSE and Connector variables only make
    // sense per instance and are appended below.
    for meta in manager.registry().entries() {
        if matches!(
            meta.component,
            ComponentName::Evse | ComponentName::Connector
        ) {
            continue;
        }
        push_unique(&mut out, &mut seen, report_entry(manager, station, meta, None));
    }

    per_evse_entries(manager, station, &mut out, &mut seen);
    out
}

/// Read-only operational snapshot: station availability, firmware, per-EVSE
/// state and connector counts.
fn summary_inventory(manager: &VariableManager, station: &mut Station) -> Vec<ReportData> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();

    for variable in ["AvailabilityState", "FirmwareVersion"] {
        if let Some(meta) = manager
            .registry()
            .lookup(ComponentName::ChargingStation, variable, None)
        {
            push_unique(&mut out, &mut seen, report_entry(manager, station, meta, None));
        }
    }

    let evse_ids: Vec<u32> = station.evses.keys().copied().collect();
    for evse_id in evse_ids {
        let instance = evse_id.to_string();
        for variable in ["AvailabilityState", "ConnectorCount"] {
            if let Some(meta) = manager
                .registry()
                .lookup(ComponentName::Evse, variable, None)
            {
                push_unique(&mut out, &mut seen, report_entry(manager, station, meta, Some(&instance)));
            }
        }

        let connector_ids: Vec<u32> = station
            .evses
            .get(&evse_id)
            .map(|evse| evse.connectors.iter().map(|c| c.id).collect())
            .unwrap_or_default();
        for connector_id in connector_ids {
            let instance = format!("{evse_id}.{connector_id}");
            if let Some(meta) =
                manager
                    .registry()
                    .lookup(ComponentName::Connector, "AvailabilityState", None)
            {
                push_unique(&mut out, &mut seen, report_entry(manager, station, meta, Some(&instance)));
            }
        }
    }

    out
}
