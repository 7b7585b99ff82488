use crate::error::Result;
use crate::identity::validate_device_id;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a client installation
///
/// Freshly generated ids are hyphenated UUID v4 strings. Ids read back from
/// storage are only required to pass [`validate_device_id`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceId(String);

impl DeviceId {
    /// Generate a new random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Wrap a stored value after validating it
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        validate_device_id(&value)?;
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for DeviceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DeviceId {
    type Error = crate::error::DeviceIdentityError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<DeviceId> for String {
    fn from(id: DeviceId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_is_uuid_shaped() {
        let id = DeviceId::generate();
        let parsed = uuid::Uuid::parse_str(id.as_str()).unwrap();

        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(id.as_str().len(), 36);
        assert_eq!(id.as_str(), id.as_str().to_lowercase());
    }

    #[test]
    fn test_generate_unique() {
        let ids: HashSet<DeviceId> = (0..1000).map(|_| DeviceId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_parse_keeps_value_unchanged() {
        let id = DeviceId::parse("existing-id-123").unwrap();
        assert_eq!(id.as_str(), "existing-id-123");
        assert_eq!(id.to_string(), "existing-id-123");

        assert!(DeviceId::parse("").is_err());
    }

    #[test]
    fn test_serde_is_transparent_and_validated() {
        let id = DeviceId::parse("abc").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");

        let back: DeviceId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<DeviceId>("\"\"").is_err());
    }
}
