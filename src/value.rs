use crate::codec::WireScalar;
use crate::error::{ProfileError, Result};
use std::collections::HashMap;

/// Conversion to and from a single raw wire scalar
///
/// Implemented by characteristic value types whose wire form is one
/// fixed-width integer. Construction from a raw value may fail when the
/// value is not acceptable for the domain type.
pub trait RawValue: Sized {
    /// Wire representation of the value
    type Raw: WireScalar;

    /// The raw wire form of this value
    fn raw_value(&self) -> Self::Raw;

    /// Construct from a raw wire value
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Range`] if the raw value is not acceptable
    /// for the domain type.
    fn from_raw(raw: Self::Raw) -> Result<Self>;
}

/// Conversion to and from a fixed-size sequence of raw wire scalars
pub trait RawArray: Sized {
    /// Wire representation of each element
    type Raw: WireScalar;

    /// Number of elements in the raw form
    const LEN: usize;

    /// The ordered raw wire form of this value
    fn raw_values(&self) -> Vec<Self::Raw>;

    /// Construct from a raw element sequence
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::LengthMismatch`] if the sequence length does
    /// not equal [`Self::LEN`], or [`ProfileError::Range`] if the elements
    /// are not acceptable for the domain type.
    fn from_raw(raw: &[Self::Raw]) -> Result<Self>;
}

/// Conversion to and from a string-keyed mapping
///
/// The mapping is the human-readable editing form used by UIs: one entry
/// per field, keyed by field name.
pub trait StringMap: Sized {
    /// The finite set of string values this type accepts
    ///
    /// Empty when values are free-form; non-empty for enum-like fields,
    /// where it drives UI pickers.
    #[must_use]
    fn accepted_values() -> Vec<String> {
        Vec::new()
    }

    /// Project this value to its string-keyed form
    fn string_map(&self) -> HashMap<String, String>;

    /// Construct from a string-keyed mapping
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::MissingKey`] if a required key is absent,
    /// [`ProfileError::Parse`] if a value does not parse, or
    /// [`ProfileError::Range`] if it parses outside the target width.
    fn from_string_map(map: &HashMap<String, String>) -> Result<Self>;
}

/// String-to-integer parsing with explicit range policy
pub trait ScalarFromStr: Sized {
    /// Parse, rejecting values outside the target width
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Parse`] if `s` is not an integer, or
    /// [`ProfileError::Range`] if the value does not fit.
    fn from_str_exact(s: &str) -> Result<Self>;

    /// Parse, saturating values outside the target width
    ///
    /// The designated clamping variant: out-of-range values clamp to the
    /// minimum or maximum representable value instead of failing.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Parse`] if `s` is not an integer.
    fn from_str_saturating(s: &str) -> Result<Self>;
}

macro_rules! scalar_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ScalarFromStr for $ty {
                fn from_str_exact(s: &str) -> Result<Self> {
                    let wide: i128 = s
                        .parse()
                        .map_err(|_| ProfileError::Parse(format!(
                            "'{s}' is not an integer"
                        )))?;
                    if wide < i128::from(<$ty>::MIN) || wide > i128::from(<$ty>::MAX) {
                        return Err(ProfileError::Range(format!(
                            "{wide} outside {} range",
                            stringify!($ty)
                        )));
                    }
                    Ok(wide as $ty)
                }

                fn from_str_saturating(s: &str) -> Result<Self> {
                    let wide: i128 = s
                        .parse()
                        .map_err(|_| ProfileError::Parse(format!(
                            "'{s}' is not an integer"
                        )))?;
                    Ok(wide.clamp(i128::from(<$ty>::MIN), i128::from(<$ty>::MAX)) as $ty)
                }
            }
        )*
    };
}

scalar_from_str!(u8, i8, u16, i16, u32, i32, u64, i64);

/// Look up `key` in a string-keyed mapping and parse it exactly
///
/// # Errors
///
/// Returns [`ProfileError::MissingKey`] if `key` is absent, or the parse
/// errors of [`ScalarFromStr::from_str_exact`].
pub fn scalar_from_map<T: ScalarFromStr>(key: &str, map: &HashMap<String, String>) -> Result<T> {
    let value = map
        .get(key)
        .ok_or_else(|| ProfileError::MissingKey(key.to_string()))?;
    T::from_str_exact(value)
}
