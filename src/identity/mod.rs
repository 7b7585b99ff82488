pub mod constants;
pub mod types;
pub mod validation;

pub use constants::{DEVICE_ID_KEY, MAX_DEVICE_ID_LEN};
pub use types::DeviceId;
pub use validation::validate_device_id;
