pub mod provider;

pub use provider::{DeviceIdProvider, MAX_CREATE_ATTEMPTS, get_device_id, peek_device_id};
