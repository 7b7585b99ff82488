pub mod get;
pub mod info;
pub mod show;

pub use get::GetCommand;
pub use info::InfoCommand;
pub use show::ShowCommand;

pub use get::execute as run_get;
pub use info::execute as run_info;
pub use show::execute as run_show;

use crate::identity::{DEVICE_ID_KEY, DeviceId};

fn device_id_json(device_id: &DeviceId) -> serde_json::Value {
    serde_json::json!({
        "key": DEVICE_ID_KEY,
        "deviceId": device_id,
    })
}
