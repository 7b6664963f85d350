//! Runtime profile wrappers around declared characteristic value types.
//!
//! Attribute values are serialized little-endian, the GATT wire byte order.
//! Conversions are pure and stateless; a profile instance carries only the
//! static declaration of the type it wraps.

use crate::attribute::{
    AttributePermission, CharacteristicConfig, CharacteristicProperty, ServiceConfig,
};
use crate::codec::{encode_slice_le, WireScalar};
use crate::error::{ProfileError, Result};
use crate::value::{RawArray, RawValue, StringMap};
use bytes::Bytes;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// Uniform runtime surface over one wrapped characteristic value type
///
/// Mediates between the three value forms: wire bytes, the domain type, and
/// the string-keyed mapping. Metadata from the wrapped type's declaration
/// is exposed unchanged for the GATT layer.
pub trait CharacteristicProfile: Send + Sync {
    /// Characteristic UUID
    fn uuid(&self) -> Uuid;

    /// Human-readable characteristic name
    fn name(&self) -> &str;

    /// Access permissions on the attribute value
    fn permissions(&self) -> &[AttributePermission];

    /// Characteristic properties
    fn properties(&self) -> &[CharacteristicProperty];

    /// Initial wire-encoded value, if one is declared
    fn initial_value(&self) -> Option<Bytes>;

    /// The finite set of string values the wrapped type accepts
    ///
    /// Empty for free-form values; used to populate UI pickers otherwise.
    fn accepted_values(&self) -> Vec<String>;

    /// Parse a string-keyed mapping and serialize it to wire bytes
    ///
    /// # Errors
    ///
    /// Propagates the wrapped type's parse errors: [`ProfileError::MissingKey`],
    /// [`ProfileError::Parse`] or [`ProfileError::Range`].
    fn data_from_string(&self, value: &HashMap<String, String>) -> Result<Bytes>;

    /// Deserialize wire bytes and project them to the string-keyed form
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::LengthMismatch`] unless `data` is exactly the
    /// declared raw layout, and propagates the wrapped type's construction
    /// errors.
    fn string_from_data(&self, data: &[u8]) -> Result<HashMap<String, String>>;
}

/// Profile over a value with a single-scalar wire form
pub struct RawCharacteristic<T> {
    uuid: Uuid,
    _value: PhantomData<T>,
}

impl<T> RawCharacteristic<T>
where
    T: RawValue + StringMap + CharacteristicConfig,
{
    /// Construct the profile from the type's declaration
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Uuid`] if the declared UUID string is
    /// malformed.
    pub fn new() -> Result<Self> {
        Ok(Self {
            uuid: Uuid::parse_str(T::UUID)?,
            _value: PhantomData,
        })
    }
}

impl<T> CharacteristicProfile for RawCharacteristic<T>
where
    T: RawValue + StringMap + CharacteristicConfig + Send + Sync,
{
    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn name(&self) -> &str {
        T::NAME
    }

    fn permissions(&self) -> &[AttributePermission] {
        T::PERMISSIONS
    }

    fn properties(&self) -> &[CharacteristicProperty] {
        T::PROPERTIES
    }

    fn initial_value(&self) -> Option<Bytes> {
        T::initial_value()
    }

    fn accepted_values(&self) -> Vec<String> {
        T::accepted_values()
    }

    fn data_from_string(&self, value: &HashMap<String, String>) -> Result<Bytes> {
        let parsed = T::from_string_map(value)?;
        Ok(parsed.raw_value().to_bytes_le())
    }

    fn string_from_data(&self, data: &[u8]) -> Result<HashMap<String, String>> {
        if data.len() != T::Raw::WIDTH {
            return Err(ProfileError::LengthMismatch {
                expected: T::Raw::WIDTH,
                actual: data.len(),
            });
        }
        let raw = T::Raw::decode_le(data, 0)?;
        Ok(T::from_raw(raw)?.string_map())
    }
}

/// Profile over a value with a fixed-size array wire form
pub struct RawArrayCharacteristic<T> {
    uuid: Uuid,
    _value: PhantomData<T>,
}

impl<T> RawArrayCharacteristic<T>
where
    T: RawArray + StringMap + CharacteristicConfig,
{
    /// Construct the profile from the type's declaration
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Uuid`] if the declared UUID string is
    /// malformed.
    pub fn new() -> Result<Self> {
        Ok(Self {
            uuid: Uuid::parse_str(T::UUID)?,
            _value: PhantomData,
        })
    }
}

impl<T> CharacteristicProfile for RawArrayCharacteristic<T>
where
    T: RawArray + StringMap + CharacteristicConfig + Send + Sync,
{
    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn name(&self) -> &str {
        T::NAME
    }

    fn permissions(&self) -> &[AttributePermission] {
        T::PERMISSIONS
    }

    fn properties(&self) -> &[CharacteristicProperty] {
        T::PROPERTIES
    }

    fn initial_value(&self) -> Option<Bytes> {
        T::initial_value()
    }

    fn accepted_values(&self) -> Vec<String> {
        T::accepted_values()
    }

    fn data_from_string(&self, value: &HashMap<String, String>) -> Result<Bytes> {
        let parsed = T::from_string_map(value)?;
        Ok(encode_slice_le(&parsed.raw_values()))
    }

    fn string_from_data(&self, data: &[u8]) -> Result<HashMap<String, String>> {
        let expected = T::LEN * T::Raw::WIDTH;
        if data.len() != expected {
            return Err(ProfileError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        let raw = T::Raw::decode_all_le(data);
        Ok(T::from_raw(&raw)?.string_map())
    }
}

/// Profile over a free-form UTF-8 string characteristic
///
/// The wire form is the raw UTF-8 bytes; the string-keyed form holds the
/// value under the characteristic's declared name.
pub struct Utf8Characteristic<T> {
    uuid: Uuid,
    _value: PhantomData<T>,
}

impl<T: CharacteristicConfig> Utf8Characteristic<T> {
    /// Construct the profile from the type's declaration
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Uuid`] if the declared UUID string is
    /// malformed.
    pub fn new() -> Result<Self> {
        Ok(Self {
            uuid: Uuid::parse_str(T::UUID)?,
            _value: PhantomData,
        })
    }
}

impl<T> CharacteristicProfile for Utf8Characteristic<T>
where
    T: CharacteristicConfig + Send + Sync,
{
    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn name(&self) -> &str {
        T::NAME
    }

    fn permissions(&self) -> &[AttributePermission] {
        T::PERMISSIONS
    }

    fn properties(&self) -> &[CharacteristicProperty] {
        T::PROPERTIES
    }

    fn initial_value(&self) -> Option<Bytes> {
        T::initial_value()
    }

    fn accepted_values(&self) -> Vec<String> {
        Vec::new()
    }

    fn data_from_string(&self, value: &HashMap<String, String>) -> Result<Bytes> {
        let text = value
            .get(T::NAME)
            .ok_or_else(|| ProfileError::MissingKey(T::NAME.to_string()))?;
        Ok(Bytes::copy_from_slice(text.as_bytes()))
    }

    fn string_from_data(&self, data: &[u8]) -> Result<HashMap<String, String>> {
        let text = std::str::from_utf8(data)
            .map_err(|_| ProfileError::Parse(format!("{} value is not valid UTF-8", T::NAME)))?;
        Ok(HashMap::from([(T::NAME.to_string(), text.to_string())]))
    }
}

/// A named, UUID-identified collection of characteristic profiles
///
/// Characteristics are kept in insertion order. Uniqueness of
/// characteristic UUIDs is not enforced here; duplicate handling lives in
/// the registry layer.
pub struct ServiceProfile {
    uuid: Uuid,
    name: String,
    tag: String,
    characteristics: Vec<Box<dyn CharacteristicProfile>>,
}

impl ServiceProfile {
    /// Construct a service profile from a declaration type
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Uuid`] if the declared UUID string is
    /// malformed.
    pub fn configured<S: ServiceConfig>() -> Result<Self> {
        Self::new(S::UUID, S::NAME, S::TAG)
    }

    /// Construct a service profile from explicit metadata
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Uuid`] if `uuid` is malformed.
    pub fn new(uuid: &str, name: impl Into<String>, tag: impl Into<String>) -> Result<Self> {
        Ok(Self {
            uuid: Uuid::parse_str(uuid)?,
            name: name.into(),
            tag: tag.into(),
            characteristics: Vec::new(),
        })
    }

    /// Append a characteristic profile
    pub fn add_characteristic(&mut self, characteristic: Box<dyn CharacteristicProfile>) {
        self.characteristics.push(characteristic);
    }

    /// Service UUID
    #[must_use]
    pub const fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Human-readable service name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning-organization tag
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Iterate the characteristic profiles in insertion order
    pub fn characteristics(&self) -> impl Iterator<Item = &dyn CharacteristicProfile> + '_ {
        self.characteristics.iter().map(|c| c.as_ref())
    }

    /// Look up the first characteristic with the given UUID
    #[must_use]
    pub fn characteristic(&self, uuid: Uuid) -> Option<&dyn CharacteristicProfile> {
        self.characteristics
            .iter()
            .find(|c| c.uuid() == uuid)
            .map(|c| c.as_ref())
    }
}

impl fmt::Debug for ServiceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceProfile")
            .field("uuid", &self.uuid)
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("characteristics", &self.characteristics.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::{
        Greeting, HelloWorldService, LatitudeLongitude, UpdatePeriod,
        UPDATE_PERIOD_CHARACTERISTIC_UUID,
    };

    #[test]
    fn test_raw_characteristic_string_from_data() {
        let profile = RawCharacteristic::<UpdatePeriod>::new().unwrap();
        let value = profile.string_from_data(&5000u16.to_bytes_le()).unwrap();

        assert_eq!(value.len(), 1);
        assert_eq!(value["Update Period"], "5000");
    }

    #[test]
    fn test_raw_characteristic_data_from_string() {
        let profile = RawCharacteristic::<UpdatePeriod>::new().unwrap();
        let map = HashMap::from([("Update Period".to_string(), "5000".to_string())]);

        let data = profile.data_from_string(&map).unwrap();
        assert_eq!(&data[..], &[0x88, 0x13]);

        let empty = HashMap::new();
        assert!(matches!(
            profile.data_from_string(&empty).unwrap_err(),
            ProfileError::MissingKey(_)
        ));
    }

    #[test]
    fn test_raw_characteristic_length_mismatch() {
        let profile = RawCharacteristic::<UpdatePeriod>::new().unwrap();
        assert!(matches!(
            profile.string_from_data(&[0x88]).unwrap_err(),
            ProfileError::LengthMismatch {
                expected: 2,
                actual: 1
            }
        ));
        assert!(profile.string_from_data(&[0x88, 0x13, 0x00]).is_err());
    }

    #[test]
    fn test_raw_characteristic_metadata() {
        let profile = RawCharacteristic::<UpdatePeriod>::new().unwrap();

        assert_eq!(
            profile.uuid(),
            Uuid::parse_str(UPDATE_PERIOD_CHARACTERISTIC_UUID).unwrap()
        );
        assert_eq!(profile.name(), "Update Period");
        assert_eq!(
            profile.permissions(),
            &[
                AttributePermission::Readable,
                AttributePermission::Writeable
            ]
        );
        assert_eq!(
            profile.properties(),
            &[CharacteristicProperty::Read, CharacteristicProperty::Write]
        );
        assert_eq!(profile.initial_value().unwrap(), 5000u16.to_bytes_le());
        assert!(profile.accepted_values().is_empty());
    }

    #[test]
    fn test_array_characteristic_round_trip() {
        let profile = RawArrayCharacteristic::<LatitudeLongitude>::new().unwrap();
        let data = encode_slice_le(&[3775i16, -12241i16]);

        let value = profile.string_from_data(&data).unwrap();
        assert_eq!(value["latitudeRaw"], "3775");
        assert_eq!(value["longitudeRaw"], "-12241");
        assert_eq!(value["latitude"], "37.75");
        assert_eq!(value["longitude"], "-122.41");

        let back = profile.data_from_string(&value).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn test_array_characteristic_length_mismatch() {
        let profile = RawArrayCharacteristic::<LatitudeLongitude>::new().unwrap();
        assert!(matches!(
            profile.string_from_data(&[0xBF, 0x0E]).unwrap_err(),
            ProfileError::LengthMismatch {
                expected: 4,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_utf8_characteristic() {
        let profile = Utf8Characteristic::<Greeting>::new().unwrap();

        let value = profile.string_from_data(b"Hello").unwrap();
        assert_eq!(value["Greeting"], "Hello");

        let data = profile.data_from_string(&value).unwrap();
        assert_eq!(&data[..], b"Hello");

        assert!(matches!(
            profile.string_from_data(&[0xFF, 0xFE]).unwrap_err(),
            ProfileError::Parse(_)
        ));
        assert!(matches!(
            profile.data_from_string(&HashMap::new()).unwrap_err(),
            ProfileError::MissingKey(_)
        ));
    }

    #[test]
    fn test_service_profile() {
        let mut service = ServiceProfile::configured::<HelloWorldService>().unwrap();
        assert_eq!(service.name(), "Hello World");
        assert_eq!(service.tag(), "gnos.us");

        service.add_characteristic(Box::new(Utf8Characteristic::<Greeting>::new().unwrap()));
        service.add_characteristic(Box::new(RawCharacteristic::<UpdatePeriod>::new().unwrap()));

        let names: Vec<_> = service.characteristics().map(|c| c.name().to_string()).collect();
        assert_eq!(names, ["Greeting", "Update Period"]);

        let uuid = Uuid::parse_str(UPDATE_PERIOD_CHARACTERISTIC_UUID).unwrap();
        assert_eq!(service.characteristic(uuid).unwrap().name(), "Update Period");
        assert!(service.characteristic(Uuid::nil()).is_none());
    }

    #[test]
    fn test_malformed_uuid_rejected() {
        assert!(ServiceProfile::new("not-a-uuid", "Broken", "test").is_err());
    }
}
