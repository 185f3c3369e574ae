//! Variable Manager
//!
//! Owns the override maps and the startup self-check set, and implements the
//! per-item `GetVariables`/`SetVariables` contracts with attribute-level
//! semantics. Batch handling, per-message limits and error absorption live
//! in the request service façade.

use super::keys::{composite_key, enforce_value_size};
use super::registry::{
    config_key_name, VariableMetadata, VariableRegistry, SIZE_CONTROL_VARIABLES,
};
use super::resolver::{self, size_limit};
use super::validator;
use crate::error::DeviceModelError;
use crate::ocpp::{
    AttributeKind, ComponentName, DataType, GetVariableData, GetVariableResult, GetVariableStatus,
    ReasonCode, SetVariableData, SetVariableResult, SetVariableStatus, StatusInfo,
    OCPP_VALUE_ABSOLUTE_MAX_LENGTH,
};
use crate::station::store::ConfigurationKeyStore;
use crate::station::Station;
use std::collections::{HashMap, HashSet};
use tracing::{error, info};

/// Rules engine for the station's device model
///
/// One instance per station keeps override state station-scoped. All
/// operations are synchronous and run to completion; callers pass the
/// station context explicitly.
#[derive(Debug, Default)]
pub struct VariableManager {
    registry: VariableRegistry,
    invalid_variables: HashSet<String>,
    runtime_overrides: HashMap<String, String>,
    min_set_overrides: HashMap<String, String>,
    max_set_overrides: HashMap<String, String>,
}

fn get_rejection(
    req: &GetVariableData,
    status: GetVariableStatus,
    info: StatusInfo,
) -> GetVariableResult {
    GetVariableResult {
        attribute_status: status,
        component: req.component.clone(),
        variable: req.variable.clone(),
        attribute_type: req.attribute_type,
        attribute_value: None,
        attribute_status_info: Some(info),
    }
}

fn get_accepted(req: &GetVariableData, value: String) -> GetVariableResult {
    GetVariableResult {
        attribute_status: GetVariableStatus::Accepted,
        component: req.component.clone(),
        variable: req.variable.clone(),
        attribute_type: req.attribute_type,
        attribute_value: Some(value),
        attribute_status_info: None,
    }
}

fn set_rejection(
    req: &SetVariableData,
    status: SetVariableStatus,
    info: StatusInfo,
) -> SetVariableResult {
    SetVariableResult {
        attribute_status: status,
        component: req.component.clone(),
        variable: req.variable.clone(),
        attribute_type: req.attribute_type,
        attribute_status_info: Some(info),
    }
}

fn set_outcome(req: &SetVariableData, status: SetVariableStatus) -> SetVariableResult {
    SetVariableResult {
        attribute_status: status,
        component: req.component.clone(),
        variable: req.variable.clone(),
        attribute_type: req.attribute_type,
        attribute_status_info: None,
    }
}

/// Smallest configured write bound, hard-capped at the protocol maximum
fn effective_write_limit(station: &Station) -> usize {
    let configured = [
        size_limit(station, "ConfigurationValueSize"),
        size_limit(station, "ValueSize"),
    ]
    .into_iter()
    .flatten()
    .min();

    match configured {
        Some(limit) => (limit as usize).min(OCPP_VALUE_ABSOLUTE_MAX_LENGTH),
        None => OCPP_VALUE_ABSOLUTE_MAX_LENGTH,
    }
}

impl VariableManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &VariableRegistry {
        &self.registry
    }

    pub(crate) fn resolved_value(
        &self,
        station: &mut Station,
        meta: &VariableMetadata,
        component_instance: Option<&str>,
    ) -> Result<String, DeviceModelError> {
        resolver::current_value(station, meta, component_instance, &self.runtime_overrides)
    }

    /// Active bound for a variable: the installed override, else the
    /// registry's static limit.
    pub(crate) fn bound_value(
        &self,
        meta: &VariableMetadata,
        component_instance: Option<&str>,
        kind: AttributeKind,
    ) -> Option<String> {
        let key = composite_key(meta.component, component_instance, meta.variable);
        match kind {
            AttributeKind::MinSet => self
                .min_set_overrides
                .get(&key)
                .cloned()
                .or_else(|| meta.min.map(|v| v.to_string())),
            AttributeKind::MaxSet => self
                .max_set_overrides
                .get(&key)
                .cloned()
                .or_else(|| meta.max.map(|v| v.to_string())),
            _ => None,
        }
    }

    /// Startup self-check: every persistent, non-write-only variable must be
    /// backed by a configuration key. Missing entries with a default are
    /// materialized; the rest land on the invalid list. Idempotent, clears
    /// the invalid set on entry.
    pub fn validate_persistent_mappings(&mut self, station: &mut Station) {
        self.invalid_variables.clear();

        for meta in self.registry.entries() {
            if !meta.is_persistent() || meta.is_write_only() {
                continue;
            }
            let key = config_key_name(meta);
            if station.config_keys.get(&key).is_some() {
                continue;
            }
            // Size controls are legitimately unset, and instance-scoped
            // entries materialize on first successful write.
            if SIZE_CONTROL_VARIABLES
                .iter()
                .any(|v| v.eq_ignore_ascii_case(meta.variable))
                || meta.is_instance_scoped()
            {
                continue;
            }

            match meta.default_value {
                Some(default) => {
                    info!(
                        station = %station.identity.id,
                        key,
                        default,
                        "materializing missing configuration key"
                    );
                    station
                        .config_keys
                        .add(&key, default, resolver::key_options(meta), false);
                }
                None => {
                    error!(
                        station = %station.identity.id,
                        component = %meta.component,
                        variable = meta.variable,
                        "persistent variable has no stored value and no default"
                    );
                    self.invalid_variables
                        .insert(composite_key(meta.component, None, meta.variable));
                }
            }
        }
    }

    /// Drop all volatile values. Used on station reboot.
    pub fn reset_runtime_overrides(&mut self) {
        self.runtime_overrides.clear();
    }

    pub fn get_variable(
        &mut self,
        station: &mut Station,
        req: &GetVariableData,
    ) -> Result<GetVariableResult, DeviceModelError> {
        let Some(component) = ComponentName::parse(&req.component.name) else {
            return Ok(get_rejection(
                req,
                GetVariableStatus::UnknownComponent,
                StatusInfo::new(
                    ReasonCode::NotFound,
                    format!("Component {} is not supported", req.component.name),
                ),
            ));
        };

        let Some(meta) = self.registry.lookup(
            component,
            &req.variable.name,
            req.variable.instance.as_deref(),
        ) else {
            return Ok(get_rejection(
                req,
                GetVariableStatus::UnknownVariable,
                StatusInfo::new(
                    ReasonCode::NotFound,
                    format!("{} is not supported", req.variable.name),
                ),
            ));
        };

        let attribute = req.attribute_type.unwrap_or_default();

        if meta.is_write_only() && attribute == AttributeKind::Actual {
            return Ok(get_rejection(
                req,
                GetVariableStatus::Rejected,
                StatusInfo::new(
                    ReasonCode::WriteOnly,
                    format!("{} is write-only", meta.variable),
                ),
            ));
        }

        if !meta.supports_attribute(attribute) {
            return Ok(get_rejection(
                req,
                GetVariableStatus::NotSupportedAttributeType,
                StatusInfo::new(
                    ReasonCode::UnsupportedParam,
                    format!("{} does not support {}", meta.variable, attribute),
                ),
            ));
        }

        let ckey = composite_key(
            component,
            req.component.instance.as_deref(),
            &req.variable.name,
        );
        if self.invalid_variables.contains(&ckey) {
            return Ok(get_rejection(
                req,
                GetVariableStatus::Rejected,
                StatusInfo::new(
                    ReasonCode::InternalError,
                    format!("{} failed the startup consistency check", meta.variable),
                ),
            ));
        }

        if matches!(attribute, AttributeKind::MinSet | AttributeKind::MaxSet) {
            return Ok(
                match self.bound_value(meta, req.component.instance.as_deref(), attribute) {
                    Some(bound) => get_accepted(req, bound),
                    None => get_rejection(
                        req,
                        GetVariableStatus::NotSupportedAttributeType,
                        StatusInfo::new(
                            ReasonCode::UnsupportedParam,
                            format!("{} has no {} bound", meta.variable, attribute),
                        ),
                    ),
                },
            );
        }

        let value = self.resolved_value(station, meta, req.component.instance.as_deref())?;

        if value.is_empty() {
            if attribute == AttributeKind::Target && meta.supports_target {
                return Ok(get_accepted(req, String::new()));
            }
            return Ok(get_rejection(
                req,
                GetVariableStatus::Rejected,
                StatusInfo::new(
                    ReasonCode::InvalidValue,
                    format!("{} has no value", meta.variable),
                ),
            ));
        }

        let mut value = value;
        if let Some(limit) = size_limit(station, "ValueSize") {
            value = enforce_value_size(value, limit);
        }
        if let Some(limit) = size_limit(station, "ReportingValueSize") {
            value = enforce_value_size(value, limit);
        }
        value = enforce_value_size(value, OCPP_VALUE_ABSOLUTE_MAX_LENGTH as i64);

        Ok(get_accepted(req, value))
    }

    pub fn set_variable(
        &mut self,
        station: &mut Station,
        req: &SetVariableData,
    ) -> Result<SetVariableResult, DeviceModelError> {
        let Some(component) = ComponentName::parse(&req.component.name) else {
            return Ok(set_rejection(
                req,
                SetVariableStatus::UnknownComponent,
                StatusInfo::new(
                    ReasonCode::NotFound,
                    format!("Component {} is not supported", req.component.name),
                ),
            ));
        };

        let Some(meta) = self.registry.lookup(
            component,
            &req.variable.name,
            req.variable.instance.as_deref(),
        ) else {
            return Ok(set_rejection(
                req,
                SetVariableStatus::UnknownVariable,
                StatusInfo::new(
                    ReasonCode::NotFound,
                    format!("{} is not supported", req.variable.name),
                ),
            ));
        };

        let attribute = req.attribute_type.unwrap_or_default();

        if !meta.supports_attribute(attribute) {
            return Ok(set_rejection(
                req,
                SetVariableStatus::NotSupportedAttributeType,
                StatusInfo::new(
                    ReasonCode::UnsupportedParam,
                    format!("{} does not support {}", meta.variable, attribute),
                ),
            ));
        }

        let ckey = composite_key(
            component,
            req.component.instance.as_deref(),
            &req.variable.name,
        );

        if self.invalid_variables.contains(&ckey)
            && attribute == AttributeKind::Actual
            && !meta.is_write_only()
        {
            return Ok(set_rejection(
                req,
                SetVariableStatus::Rejected,
                StatusInfo::new(
                    ReasonCode::InternalError,
                    format!("{} failed the startup consistency check", meta.variable),
                ),
            ));
        }

        if matches!(attribute, AttributeKind::MinSet | AttributeKind::MaxSet) {
            return Ok(self.set_bound(meta, &ckey, attribute, req));
        }

        self.set_actual(station, meta, &ckey, req)
    }

    /// Install a `MinSet`/`MaxSet` override. Bounds exist for integer
    /// variables only and must stay inside the registry's static limits and
    /// consistent with the opposite bound.
    fn set_bound(
        &mut self,
        meta: &VariableMetadata,
        ckey: &str,
        attribute: AttributeKind,
        req: &SetVariableData,
    ) -> SetVariableResult {
        if meta.data_type != DataType::Integer {
            return set_rejection(
                req,
                SetVariableStatus::Rejected,
                StatusInfo::new(
                    ReasonCode::UnsupportedParam,
                    format!("{} bounds require an integer variable", meta.variable),
                ),
            );
        }

        let value = match validator::validate_integer(meta, &req.attribute_value) {
            Ok(parsed) => parsed,
            Err(rejection) => {
                return set_rejection(
                    req,
                    SetVariableStatus::Rejected,
                    StatusInfo::new(rejection.reason, rejection.info),
                )
            }
        };

        let parse_override = |stored: Option<&String>| stored.and_then(|v| v.parse::<i64>().ok());

        if attribute == AttributeKind::MinSet {
            let effective_max = parse_override(self.max_set_overrides.get(ckey)).or(meta.max);
            if let Some(max) = effective_max {
                if value > max {
                    return set_rejection(
                        req,
                        SetVariableStatus::Rejected,
                        StatusInfo::new(ReasonCode::InvalidValue, "MinSet greater than MaxSet"),
                    );
                }
            }
            self.min_set_overrides
                .insert(ckey.to_string(), value.to_string());
        } else {
            let effective_min = parse_override(self.min_set_overrides.get(ckey)).or(meta.min);
            if let Some(min) = effective_min {
                if value < min {
                    return set_rejection(
                        req,
                        SetVariableStatus::Rejected,
                        StatusInfo::new(ReasonCode::InvalidValue, "MaxSet lower than MinSet"),
                    );
                }
            }
            self.max_set_overrides
                .insert(ckey.to_string(), value.to_string());
        }

        set_outcome(req, SetVariableStatus::Accepted)
    }

    /// `Actual` (and `Target`) write path: mutability, size limit,
    /// validation, bound enforcement, then the store or the volatile map.
    fn set_actual(
        &mut self,
        station: &mut Station,
        meta: &VariableMetadata,
        ckey: &str,
        req: &SetVariableData,
    ) -> Result<SetVariableResult, DeviceModelError> {
        if meta.is_read_only() {
            return Ok(set_rejection(
                req,
                SetVariableStatus::Rejected,
                StatusInfo::new(
                    ReasonCode::ReadOnly,
                    format!("{} is read-only", meta.variable),
                ),
            ));
        }

        let value = &req.attribute_value;

        let limit = effective_write_limit(station);
        if value.chars().count() > limit {
            return Ok(set_rejection(
                req,
                SetVariableStatus::Rejected,
                StatusInfo::new(
                    ReasonCode::TooLargeElement,
                    format!("Value exceeds {limit} characters"),
                ),
            ));
        }

        if let Err(rejection) = validator::validate_value(meta, value) {
            return Ok(set_rejection(
                req,
                SetVariableStatus::Rejected,
                StatusInfo::new(rejection.reason, rejection.info),
            ));
        }

        if meta.data_type == DataType::Integer {
            if let Ok(parsed) = value.parse::<i64>() {
                let min_override = self
                    .min_set_overrides
                    .get(ckey)
                    .and_then(|v| v.parse::<i64>().ok());
                if let Some(min) = min_override {
                    if parsed < min {
                        return Ok(set_rejection(
                            req,
                            SetVariableStatus::Rejected,
                            StatusInfo::new(
                                ReasonCode::ValueTooLow,
                                format!("Minimum allowed value is {min}"),
                            ),
                        ));
                    }
                }
                let max_override = self
                    .max_set_overrides
                    .get(ckey)
                    .and_then(|v| v.parse::<i64>().ok());
                if let Some(max) = max_override {
                    if parsed > max {
                        return Ok(set_rejection(
                            req,
                            SetVariableStatus::Rejected,
                            StatusInfo::new(
                                ReasonCode::ValueTooHigh,
                                format!("Maximum allowed value is {max}"),
                            ),
                        ));
                    }
                }
            }
        }

        let mut changed = false;
        let mut reboot_flagged = meta.reboot_required;

        if meta.is_persistent() && !meta.is_write_only() {
            let key = config_key_name(meta);
            match station.config_keys.get(&key) {
                Some(previous) => {
                    changed = previous.value != *value;
                    reboot_flagged = reboot_flagged || previous.requires_reboot();
                    station.config_keys.set_value(&key, value)?;
                }
                None => {
                    changed = true;
                    station
                        .config_keys
                        .add(&key, value, resolver::key_options(meta), false);
                }
            }
        } else if !meta.is_persistent() && !meta.is_read_only() {
            changed = self
                .runtime_overrides
                .get(ckey)
                .map(|previous| previous != value)
                .unwrap_or(true);
            self.runtime_overrides
                .insert(ckey.to_string(), value.clone());
        }

        // A successful write repairs a write-only variable flagged invalid.
        if meta.is_write_only() {
            self.invalid_variables.remove(ckey);
        }

        apply_side_effects(station, meta, value);

        let status = if reboot_flagged && changed {
            SetVariableStatus::RebootRequired
        } else {
            SetVariableStatus::Accepted
        };
        Ok(set_outcome(req, status))
    }

    #[cfg(test)]
    pub(crate) fn mark_invalid(&mut self, key: &str) {
        self.invalid_variables.insert(key.to_string());
    }

    #[cfg(test)]
    pub(crate) fn is_invalid(&self, key: &str) -> bool {
        self.invalid_variables.contains(key)
    }
}

/// Timer restarts requested by interval writes. Explicit station calls, not
/// events: the coupling is part of the contract.
fn apply_side_effects(station: &mut Station, meta: &VariableMetadata, value: &str) {
    if meta.variable.eq_ignore_ascii_case("HeartbeatInterval") {
        if let Ok(secs) = value.parse::<u64>() {
            if secs > 0 {
                station.heartbeat_interval = secs;
                station.restart_heartbeat();
            }
        }
    } else if meta.variable.eq_ignore_ascii_case("WebSocketPingInterval") {
        if let Ok(secs) = value.parse::<u64>() {
            station.ws_ping_interval = secs;
            station.restart_web_socket_ping();
        }
    }
}
