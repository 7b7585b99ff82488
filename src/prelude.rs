//! Prelude module for convenient imports
//!
//! Use `use device_identity::prelude::*;` to import commonly used types

// Provider
pub use crate::core::{DeviceIdProvider, get_device_id, peek_device_id};

// Identifier
pub use crate::identity::{DEVICE_ID_KEY, DeviceId, validate_device_id};

// Storage
pub use crate::storage::{FileStore, KeyValueStore, MemoryStore, SwapOutcome};

// Configuration
pub use crate::config::IdentityConfig;

// Error handling
pub use crate::error::{DeviceIdentityError, Result};
