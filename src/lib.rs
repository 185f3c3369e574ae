//! OCPP 2.0.1 Device Model for an EV charging-station simulator
//!
//! This crate is the rules engine behind the `GetVariables`, `SetVariables`
//! and `GetBaseReport` use cases: a registry-backed Component/Variable data
//! model with attribute-level semantics, mutability and persistence classes,
//! size-limit arithmetic and deterministic rejection taxonomies. Transport,
//! envelope validation and report delivery are the caller's business.
//!
//! ```
//! use ocpp_device_model::config::SimulatorConfig;
//! use ocpp_device_model::ocpp::{Component, GetVariableData, Variable};
//! use ocpp_device_model::{DeviceModelService, Station};
//!
//! let mut service = DeviceModelService::new();
//! let mut station = Station::from_config(&SimulatorConfig::default());
//! service.bootstrap(&mut station);
//!
//! let results = service.get_variables(
//!     &mut station,
//!     &[GetVariableData {
//!         component: Component::named("OCPPCommCtrlr"),
//!         variable: Variable::named("HeartbeatInterval"),
//!         attribute_type: None,
//!     }],
//! );
//! assert_eq!(results[0].attribute_value.as_deref(), Some("60"));
//! ```

pub mod config;
pub mod device_model;
pub mod error;
pub mod ocpp;
pub mod station;

pub use config::SimulatorConfig;
pub use device_model::{DeviceModelService, VariableManager};
pub use station::Station;
