pub mod config;
pub mod core;
pub mod error;
pub mod identity;
pub mod storage;
pub mod prelude;

pub use crate::config::IdentityConfig;
pub use crate::core::{DeviceIdProvider, MAX_CREATE_ATTEMPTS, get_device_id, peek_device_id};
pub use crate::error::{DeviceIdentityError, Result};
pub use crate::identity::{DEVICE_ID_KEY, DeviceId, MAX_DEVICE_ID_LEN, validate_device_id};
pub use crate::storage::{
    FileStore, FileSystem, KeyValueStore, MemoryStore, SwapOutcome, TokioFileSystem,
};

#[cfg(feature = "cli")]
pub mod cli;
