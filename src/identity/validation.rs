use crate::error::{DeviceIdentityError, Result};
use crate::identity::MAX_DEVICE_ID_LEN;

/// Validates a stored device identifier
///
/// Identifiers are opaque: any non-empty printable token is accepted, so
/// values written by older clients (which were never UUIDs) stay valid.
/// Only values that could not have been written intentionally are rejected.
pub fn validate_device_id(value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DeviceIdentityError::invalid_device_id(
            value,
            "device id cannot be empty",
        ));
    }

    if value.trim() != value {
        return Err(DeviceIdentityError::invalid_device_id(
            value,
            "device id has surrounding whitespace",
        ));
    }

    if value.chars().any(char::is_control) {
        return Err(DeviceIdentityError::invalid_device_id(
            value,
            "device id contains control characters",
        ));
    }

    if value.len() > MAX_DEVICE_ID_LEN {
        return Err(DeviceIdentityError::invalid_device_id(
            value,
            format!("device id longer than {} bytes", MAX_DEVICE_ID_LEN),
        ));
    }

    Ok(())
}
