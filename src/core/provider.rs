use crate::error::{DeviceIdentityError, Result};
use crate::identity::{DEVICE_ID_KEY, DeviceId};
use crate::storage::{KeyValueStore, SwapOutcome};
use tokio::sync::OnceCell;

/// Conditional writes attempted before giving up on a contended slot
pub const MAX_CREATE_ATTEMPTS: u32 = 3;

/// Return the device identifier stored in `store`, creating it if needed
///
/// A stored value that passes [`validate_device_id`] is returned unchanged
/// and nothing is written. A missing or empty slot is filled with a freshly
/// generated id using set-if-absent. A stored value that fails validation
/// (surrounding whitespace, control characters, or longer than
/// [`MAX_DEVICE_ID_LEN`] bytes) is **overwritten** with a new id using
/// compare-and-swap; the old value is lost. When a concurrent writer wins
/// either race, its value is returned instead.
///
/// [`validate_device_id`]: crate::identity::validate_device_id
/// [`MAX_DEVICE_ID_LEN`]: crate::identity::MAX_DEVICE_ID_LEN
pub async fn get_device_id<S: KeyValueStore + ?Sized>(store: &S) -> Result<DeviceId> {
    let mut current = store.get(DEVICE_ID_KEY).await?;
    let mut attempts = 0;

    loop {
        let expected = match current.as_deref() {
            None | Some("") => None,
            Some(value) => match DeviceId::parse(value) {
                Ok(id) => {
                    tracing::debug!("Using stored device id {}", id);
                    return Ok(id);
                }
                Err(e) => {
                    tracing::warn!("Replacing unusable stored device id: {}", e);
                    Some(value)
                }
            },
        };

        if attempts == MAX_CREATE_ATTEMPTS {
            return Err(DeviceIdentityError::Contention { attempts });
        }
        attempts += 1;

        let candidate = DeviceId::generate();
        match store
            .compare_and_swap(DEVICE_ID_KEY, expected, candidate.as_str())
            .await?
        {
            SwapOutcome::Swapped => {
                tracing::info!("Created device id {}", candidate);
                return Ok(candidate);
            }
            SwapOutcome::Conflict { current: latest } => {
                tracing::debug!("Device id slot changed concurrently (attempt {})", attempts);
                current = latest;
            }
        }
    }
}

/// Read the stored device identifier without creating one
pub async fn peek_device_id<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<DeviceId>> {
    match store.get(DEVICE_ID_KEY).await? {
        None => Ok(None),
        Some(value) if value.is_empty() => Ok(None),
        Some(value) => DeviceId::parse(value).map(Some),
    }
}

/// Device identity provider bound to one storage scope
///
/// The identifier is resolved at most once per provider; concurrent callers
/// wait on the same resolution and later calls never touch storage.
pub struct DeviceIdProvider<S: KeyValueStore> {
    store: S,
    resolved: OnceCell<DeviceId>,
}

impl<S: KeyValueStore> DeviceIdProvider<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            resolved: OnceCell::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the device identifier, creating and persisting it on first use
    pub async fn get_or_create_device_id(&self) -> Result<DeviceId> {
        self.resolved
            .get_or_try_init(|| get_device_id(&self.store))
            .await
            .cloned()
    }

    /// Get the device identifier if one has already been stored
    pub async fn peek(&self) -> Result<Option<DeviceId>> {
        if let Some(id) = self.resolved.get() {
            return Ok(Some(id.clone()));
        }
        peek_device_id(&self.store).await
    }
}
