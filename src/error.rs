use crate::station::store::StoreError;
use thiserror::Error;

/// Internal failures of the device model subsystem
///
/// These never cross the protocol surface: the request façade converts each
/// one into a per-item rejection with `reasonCode = InternalError`.
#[derive(Debug, Error)]
pub enum DeviceModelError {
    #[error("configuration store error: {0}")]
    Store(#[from] StoreError),
}
