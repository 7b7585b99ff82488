/// Storage key holding the device identifier
pub const DEVICE_ID_KEY: &str = "app_device_id";

/// Longest stored value accepted as an identifier, in bytes
pub const MAX_DEVICE_ID_LEN: usize = 128;
