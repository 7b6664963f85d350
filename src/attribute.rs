use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Access permission on a characteristic's attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributePermission {
    /// Value may be read
    Readable,
    /// Value may be written
    Writeable,
    /// Reads require an encrypted link
    ReadEncryptionRequired,
    /// Writes require an encrypted link
    WriteEncryptionRequired,
}

impl fmt::Display for AttributePermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Readable => write!(f, "Readable"),
            Self::Writeable => write!(f, "Writeable"),
            Self::ReadEncryptionRequired => write!(f, "Read Encryption Required"),
            Self::WriteEncryptionRequired => write!(f, "Write Encryption Required"),
        }
    }
}

/// GATT characteristic property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacteristicProperty {
    /// Value may be broadcast in advertising data
    Broadcast,
    /// Value may be read
    Read,
    /// Value may be written without a response
    WriteWithoutResponse,
    /// Value may be written
    Write,
    /// Signed writes are permitted
    AuthenticatedSignedWrites,
    /// Value changes are pushed by notification
    Notify,
    /// Value changes are pushed by indication
    Indicate,
    /// Notifications require an encrypted link
    NotifyEncryptionRequired,
    /// Indications require an encrypted link
    IndicateEncryptionRequired,
    /// Additional properties live in the extended properties descriptor
    ExtendedProperties,
}

impl fmt::Display for CharacteristicProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Broadcast => write!(f, "Broadcast"),
            Self::Read => write!(f, "Read"),
            Self::WriteWithoutResponse => write!(f, "Write Without Response"),
            Self::Write => write!(f, "Write"),
            Self::AuthenticatedSignedWrites => write!(f, "Authenticated Signed Writes"),
            Self::Notify => write!(f, "Notify"),
            Self::Indicate => write!(f, "Indicate"),
            Self::NotifyEncryptionRequired => write!(f, "Notify Encryption Required"),
            Self::IndicateEncryptionRequired => write!(f, "Indicate Encryption Required"),
            Self::ExtendedProperties => write!(f, "Extended Properties"),
        }
    }
}

/// Static declaration of a characteristic
///
/// Declared once per characteristic value type and shared by every profile
/// instance wrapping that type. The UUID is held in canonical hyphenated
/// string form and parsed when a profile is constructed.
pub trait CharacteristicConfig {
    /// 128-bit characteristic UUID, canonical hyphenated form
    const UUID: &'static str;
    /// Human-readable characteristic name
    const NAME: &'static str;
    /// Access permissions on the attribute value
    const PERMISSIONS: &'static [AttributePermission];
    /// Characteristic properties
    const PROPERTIES: &'static [CharacteristicProperty];

    /// Initial wire-encoded value, if the characteristic declares one
    #[must_use]
    fn initial_value() -> Option<Bytes> {
        None
    }
}

/// Static declaration of a service
pub trait ServiceConfig {
    /// 128-bit service UUID, canonical hyphenated form
    const UUID: &'static str;
    /// Human-readable service name
    const NAME: &'static str;
    /// Owning-organization tag
    const TAG: &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(AttributePermission::Readable.to_string(), "Readable");
        assert_eq!(
            CharacteristicProperty::WriteWithoutResponse.to_string(),
            "Write Without Response"
        );
    }

    #[test]
    fn test_default_initial_value() {
        struct Bare;

        impl CharacteristicConfig for Bare {
            const UUID: &'static str = "00000000-0000-0000-0000-000000000000";
            const NAME: &'static str = "Bare";
            const PERMISSIONS: &'static [AttributePermission] = &[AttributePermission::Readable];
            const PROPERTIES: &'static [CharacteristicProperty] = &[CharacteristicProperty::Read];
        }

        assert!(Bare::initial_value().is_none());
    }
}
