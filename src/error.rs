use thiserror::Error;

/// Errors that can occur while converting or cataloging profile data
#[derive(Error, Debug)]
pub enum ProfileError {
    /// Decode window extends past the end of the buffer
    #[error("decode out of range: offset {offset} + width {width} exceeds {len} byte buffer")]
    OutOfRange {
        /// Byte offset the decode started at
        offset: usize,
        /// Width of the value in bytes
        width: usize,
        /// Length of the buffer
        len: usize,
    },

    /// String could not be parsed as the required type
    #[error("parse failure: {0}")]
    Parse(String),

    /// Value is outside the representable range of the target type
    #[error("range failure: {0}")]
    Range(String),

    /// Buffer or array length does not match the declared raw layout
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Length the raw layout requires
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// Required key absent from a string-keyed value
    #[error("missing key: {0}")]
    MissingKey(String),

    /// Declared UUID string is not a valid UUID
    #[error("invalid UUID: {0}")]
    Uuid(#[from] uuid::Error),
}

/// Result type for profile operations
pub type Result<T> = std::result::Result<T, ProfileError>;

impl ProfileError {
    /// Check if this error came from converting a value
    ///
    /// Conversion errors are recoverable: the caller rejects the offending
    /// value and carries on.
    #[must_use]
    pub const fn is_conversion_error(&self) -> bool {
        matches!(
            self,
            Self::OutOfRange { .. }
                | Self::Parse(_)
                | Self::Range(_)
                | Self::LengthMismatch { .. }
                | Self::MissingKey(_)
        )
    }

    /// Check if this error came from a profile declaration
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Uuid(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let parse_error = ProfileError::Parse("not a number".to_string());
        assert!(parse_error.is_conversion_error());
        assert!(!parse_error.is_configuration_error());

        let length_error = ProfileError::LengthMismatch {
            expected: 4,
            actual: 1,
        };
        assert!(length_error.is_conversion_error());

        let uuid_error = ProfileError::from(uuid::Uuid::parse_str("nope").unwrap_err());
        assert!(!uuid_error.is_conversion_error());
        assert!(uuid_error.is_configuration_error());
    }

    #[test]
    fn test_error_display() {
        let error = ProfileError::OutOfRange {
            offset: 4,
            width: 2,
            len: 5,
        };
        let error_string = format!("{error}");
        assert!(error_string.contains("offset 4"));
        assert!(error_string.contains("5 byte buffer"));

        let error = ProfileError::MissingKey("Update Period".to_string());
        assert!(format!("{error}").contains("Update Period"));
    }
}
