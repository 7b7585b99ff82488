use thiserror::Error;

/// Errors that can occur while resolving the device identifier
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DeviceIdentityError {
    // ============================================================================
    // Storage Errors
    // ============================================================================
    #[error("Storage unavailable: {message}")]
    StorageUnavailable { message: String },

    #[error("Storage contention: value kept changing after {attempts} attempts")]
    Contention { attempts: u32 },

    // ============================================================================
    // Identifier Errors
    // ============================================================================
    #[error("Invalid device id {value:?}: {reason}")]
    InvalidDeviceId { value: String, reason: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl DeviceIdentityError {
    /// Create a storage unavailable error with a message
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            message: msg.into(),
        }
    }

    /// Create an invalid device id error
    pub fn invalid_device_id(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDeviceId {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error with a message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Whether the error came from the underlying store
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::StorageUnavailable { .. })
    }
}

impl From<std::io::Error> for DeviceIdentityError {
    fn from(source: std::io::Error) -> Self {
        Self::storage(format!("IO error: {}", source))
    }
}

impl From<serde_json::Error> for DeviceIdentityError {
    fn from(source: serde_json::Error) -> Self {
        Self::storage(format!("Malformed store document: {}", source))
    }
}

pub type Result<T> = std::result::Result<T, DeviceIdentityError>;
