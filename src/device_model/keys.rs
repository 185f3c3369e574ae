//! Key & Size Utilities
//!
//! Composite-key construction for the override maps and the code-point
//! truncation used by the size-control variables.

use crate::ocpp::ComponentName;

/// Lower-cased composite key `component[.componentInstance]/variable` used by
/// the override and invalid-variable maps.
pub fn composite_key(
    component: ComponentName,
    component_instance: Option<&str>,
    variable: &str,
) -> String {
    let component = component.as_str().to_ascii_lowercase();
    let variable = variable.to_ascii_lowercase();
    match component_instance {
        Some(instance) if !instance.is_empty() => {
            format!("{}.{}/{}", component, instance.to_ascii_lowercase(), variable)
        }
        _ => format!("{component}/{variable}"),
    }
}

/// Truncate a value to `limit` Unicode code points ("string length" as the
/// protocol counts it). Non-positive limits are no-ops.
pub fn enforce_value_size(value: String, limit: i64) -> String {
    if limit <= 0 {
        return value;
    }
    let limit = limit as usize;
    if value.chars().count() <= limit {
        value
    } else {
        value.chars().take(limit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_key_lower_cases_all_parts() {
        assert_eq!(
            composite_key(ComponentName::AuthCtrlr, None, "AuthorizeRemoteStart"),
            "authctrlr/authorizeremotestart"
        );
        assert_eq!(
            composite_key(ComponentName::Evse, Some("1"), "AvailabilityState"),
            "evse.1/availabilitystate"
        );
    }

    #[test]
    fn test_composite_key_empty_instance_is_flattened() {
        assert_eq!(
            composite_key(ComponentName::TxCtrlr, Some(""), "TxStartPoint"),
            "txctrlr/txstartpoint"
        );
    }

    #[test]
    fn test_enforce_value_size_counts_code_points() {
        // four code points, more than four bytes
        let value = "héllö".to_string();
        assert_eq!(enforce_value_size(value.clone(), 4), "héll");
        assert_eq!(enforce_value_size(value.clone(), 10), "héllö");
    }

    #[test]
    fn test_enforce_value_size_ignores_non_positive_limits() {
        let value = "unbounded".to_string();
        assert_eq!(enforce_value_size(value.clone(), 0), "unbounded");
        assert_eq!(enforce_value_size(value, -5), "unbounded");
    }
}
