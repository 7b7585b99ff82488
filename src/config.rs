use crate::error::{DeviceIdentityError, Result};
use crate::storage::FileStore;
use directories::BaseDirs;
use std::path::PathBuf;

/// Directory under the platform local data dir that holds the store
pub const APP_DIR_NAME: &str = "device-identity";

/// File name of the durable key-value store
pub const STORE_FILE_NAME: &str = "storage.json";

/// Environment variable overriding the store location
pub const STORE_PATH_ENV: &str = "DEVICE_IDENTITY_STORE";

/// Where the durable identity store lives
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentityConfig {
    pub store_path: PathBuf,
}

impl IdentityConfig {
    pub fn new(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
        }
    }

    /// Default location: `<local data dir>/device-identity/storage.json`
    ///
    /// That is `~/.local/share` on Linux, `~/Library/Application Support` on
    /// macOS and `%LOCALAPPDATA%` on Windows.
    pub fn platform_default() -> Result<Self> {
        let base = BaseDirs::new().ok_or_else(|| {
            DeviceIdentityError::config("Unable to locate the local data directory")
        })?;
        Ok(Self::new(
            base.data_local_dir().join(APP_DIR_NAME).join(STORE_FILE_NAME),
        ))
    }

    /// Use `override_path` when given, otherwise the platform default
    pub fn resolve(override_path: Option<PathBuf>) -> Result<Self> {
        match override_path {
            Some(path) => Ok(Self::new(path)),
            None => Self::platform_default(),
        }
    }

    pub fn open_store(&self) -> FileStore {
        FileStore::new(&self.store_path)
    }
}
