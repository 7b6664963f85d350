//! Built-in service profile definitions and the registration entry point.

use crate::attribute::{
    AttributePermission, CharacteristicConfig, CharacteristicProperty, ServiceConfig,
};
use crate::codec::{encode_slice_le, WireScalar};
use crate::error::{ProfileError, Result};
use crate::profile::{
    RawArrayCharacteristic, RawCharacteristic, ServiceProfile, Utf8Characteristic,
};
use crate::registry::ProfileRegistry;
use crate::value::{scalar_from_map, RawArray, RawValue, StringMap};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

/// Hello World service UUID
pub const HELLO_WORLD_SERVICE_UUID: &str = "2f0a0000-69aa-f316-3e78-4194989a6c1a";

/// Greeting characteristic UUID
pub const GREETING_CHARACTERISTIC_UUID: &str = "2f0a0001-69aa-f316-3e78-4194989a6c1a";

/// Update Period characteristic UUID
pub const UPDATE_PERIOD_CHARACTERISTIC_UUID: &str = "2f0a0002-69aa-f316-3e78-4194989a6c1a";

/// Location service UUID
pub const LOCATION_SERVICE_UUID: &str = "2f0a0001-69aa-f316-3e78-4194989a6c1a";

/// Latitude and Longitude characteristic UUID
pub const LATITUDE_LONGITUDE_CHARACTERISTIC_UUID: &str = "2f0a0017-69aa-f316-3e78-4194989a6c1a";

/// Hello World service declaration
pub struct HelloWorldService;

impl ServiceConfig for HelloWorldService {
    const UUID: &'static str = HELLO_WORLD_SERVICE_UUID;
    const NAME: &'static str = "Hello World";
    const TAG: &'static str = "gnos.us";
}

/// Free-form UTF-8 greeting characteristic declaration
pub struct Greeting;

impl CharacteristicConfig for Greeting {
    const UUID: &'static str = GREETING_CHARACTERISTIC_UUID;
    const NAME: &'static str = "Greeting";
    const PERMISSIONS: &'static [AttributePermission] = &[
        AttributePermission::Readable,
        AttributePermission::Writeable,
    ];
    const PROPERTIES: &'static [CharacteristicProperty] = &[
        CharacteristicProperty::Read,
        CharacteristicProperty::Notify,
    ];

    fn initial_value() -> Option<Bytes> {
        Some(Bytes::from_static(b"Hello"))
    }
}

/// Update period in milliseconds, transmitted as an unsigned 16-bit value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePeriod {
    /// Period in milliseconds
    pub period: u16,
}

impl CharacteristicConfig for UpdatePeriod {
    const UUID: &'static str = UPDATE_PERIOD_CHARACTERISTIC_UUID;
    const NAME: &'static str = "Update Period";
    const PERMISSIONS: &'static [AttributePermission] = &[
        AttributePermission::Readable,
        AttributePermission::Writeable,
    ];
    const PROPERTIES: &'static [CharacteristicProperty] = &[
        CharacteristicProperty::Read,
        CharacteristicProperty::Write,
    ];

    fn initial_value() -> Option<Bytes> {
        Some(5000u16.to_bytes_le())
    }
}

impl RawValue for UpdatePeriod {
    type Raw = u16;

    fn raw_value(&self) -> u16 {
        self.period
    }

    fn from_raw(raw: u16) -> Result<Self> {
        Ok(Self { period: raw })
    }
}

impl StringMap for UpdatePeriod {
    fn string_map(&self) -> HashMap<String, String> {
        HashMap::from([(Self::NAME.to_string(), self.period.to_string())])
    }

    fn from_string_map(map: &HashMap<String, String>) -> Result<Self> {
        Ok(Self {
            period: scalar_from_map(Self::NAME, map)?,
        })
    }
}

/// Location service declaration
pub struct LocationService;

impl ServiceConfig for LocationService {
    const UUID: &'static str = LOCATION_SERVICE_UUID;
    const NAME: &'static str = "Location";
    const TAG: &'static str = "gnos.us";
}

/// A latitude/longitude pair in degrees
///
/// The wire form is two signed 16-bit integers holding the degree values
/// as two-decimal-place fixed point: `raw = round(degrees * 100)`. Decoding
/// recovers `raw / 100`, so round-tripped coordinates are accurate to 1/100
/// of a degree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatitudeLongitude {
    latitude_raw: i16,
    longitude_raw: i16,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl LatitudeLongitude {
    /// Construct from degree values
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Range`] if either scaled coordinate
    /// overflows the signed 16-bit wire encoding.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        Ok(Self {
            latitude_raw: Self::raw_from_degrees(latitude)?,
            longitude_raw: Self::raw_from_degrees(longitude)?,
            latitude,
            longitude,
        })
    }

    /// The fixed-point wire form of the latitude
    #[must_use]
    pub const fn latitude_raw(&self) -> i16 {
        self.latitude_raw
    }

    /// The fixed-point wire form of the longitude
    #[must_use]
    pub const fn longitude_raw(&self) -> i16 {
        self.longitude_raw
    }

    fn raw_from_degrees(degrees: f64) -> Result<i16> {
        let scaled = (degrees * 100.0).round();
        if !(f64::from(i16::MIN)..=f64::from(i16::MAX)).contains(&scaled) {
            return Err(ProfileError::Range(format!(
                "{degrees} degrees does not fit the 16-bit fixed-point encoding"
            )));
        }
        Ok(scaled as i16)
    }

    fn degrees_from_raw(raw: i16) -> f64 {
        f64::from(raw) / 100.0
    }
}

impl CharacteristicConfig for LatitudeLongitude {
    const UUID: &'static str = LATITUDE_LONGITUDE_CHARACTERISTIC_UUID;
    const NAME: &'static str = "Latitude and Longitude";
    const PERMISSIONS: &'static [AttributePermission] = &[
        AttributePermission::Readable,
        AttributePermission::Writeable,
    ];
    const PROPERTIES: &'static [CharacteristicProperty] = &[
        CharacteristicProperty::Read,
        CharacteristicProperty::Write,
    ];

    fn initial_value() -> Option<Bytes> {
        let value = Self::new(37.752_760, -122.413_234).ok()?;
        Some(encode_slice_le(&value.raw_values()))
    }
}

impl RawArray for LatitudeLongitude {
    type Raw = i16;

    const LEN: usize = 2;

    fn raw_values(&self) -> Vec<i16> {
        vec![self.latitude_raw, self.longitude_raw]
    }

    fn from_raw(raw: &[i16]) -> Result<Self> {
        if raw.len() != Self::LEN {
            return Err(ProfileError::LengthMismatch {
                expected: Self::LEN,
                actual: raw.len(),
            });
        }
        Ok(Self {
            latitude_raw: raw[0],
            longitude_raw: raw[1],
            latitude: Self::degrees_from_raw(raw[0]),
            longitude: Self::degrees_from_raw(raw[1]),
        })
    }
}

impl StringMap for LatitudeLongitude {
    fn string_map(&self) -> HashMap<String, String> {
        HashMap::from([
            ("latitudeRaw".to_string(), self.latitude_raw.to_string()),
            ("longitudeRaw".to_string(), self.longitude_raw.to_string()),
            ("latitude".to_string(), self.latitude.to_string()),
            ("longitude".to_string(), self.longitude.to_string()),
        ])
    }

    // The degree entries are display-only; reconstruction reads the raw
    // keys and recomputes the degrees.
    fn from_string_map(map: &HashMap<String, String>) -> Result<Self> {
        let latitude_raw: i16 = scalar_from_map("latitudeRaw", map)?;
        let longitude_raw: i16 = scalar_from_map("longitudeRaw", map)?;
        Ok(Self {
            latitude_raw,
            longitude_raw,
            latitude: Self::degrees_from_raw(latitude_raw),
            longitude: Self::degrees_from_raw(longitude_raw),
        })
    }
}

/// Assemble the built-in service profiles and register them
///
/// # Errors
///
/// Returns [`ProfileError::Uuid`] if a declared UUID constant is
/// malformed; the built-in declarations are expected to always register
/// cleanly.
pub fn register_profiles(registry: &mut ProfileRegistry) -> Result<()> {
    let mut hello_world = ServiceProfile::configured::<HelloWorldService>()?;
    hello_world.add_characteristic(Box::new(Utf8Characteristic::<Greeting>::new()?));
    hello_world.add_characteristic(Box::new(RawCharacteristic::<UpdatePeriod>::new()?));
    registry.add_service(hello_world);

    let mut location = ServiceProfile::configured::<LocationService>()?;
    location.add_characteristic(Box::new(RawArrayCharacteristic::<LatitudeLongitude>::new()?));
    registry.add_service(location);

    info!("registered built-in service profiles: Hello World, Location");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_update_period_string_contract() {
        let period = UpdatePeriod::from_raw(5000).unwrap();
        assert_eq!(period.string_map()["Update Period"], "5000");

        let map = HashMap::from([("Update Period".to_string(), "5000".to_string())]);
        assert_eq!(UpdatePeriod::from_string_map(&map).unwrap(), period);

        let bad = HashMap::from([("Update Period".to_string(), "soon".to_string())]);
        assert!(matches!(
            UpdatePeriod::from_string_map(&bad).unwrap_err(),
            ProfileError::Parse(_)
        ));
    }

    #[test]
    fn test_update_period_initial_value() {
        assert_eq!(&UpdatePeriod::initial_value().unwrap()[..], &[0x88, 0x13]);
    }

    #[test]
    fn test_latitude_longitude_precision() {
        let value = LatitudeLongitude::new(37.752_760, -122.413_234).unwrap();
        assert_eq!(value.latitude_raw(), 3775);
        assert_eq!(value.longitude_raw(), -12241);

        let decoded = LatitudeLongitude::from_raw(&value.raw_values()).unwrap();
        assert!((decoded.latitude - 37.752_760).abs() < 0.01);
        assert!((decoded.longitude - (-122.413_234)).abs() < 0.01);
    }

    #[test]
    fn test_latitude_longitude_range_rejection() {
        assert!(matches!(
            LatitudeLongitude::new(400.0, 0.0).unwrap_err(),
            ProfileError::Range(_)
        ));
        assert!(matches!(
            LatitudeLongitude::new(0.0, -400.0).unwrap_err(),
            ProfileError::Range(_)
        ));

        // 327.67 is the last representable coordinate
        assert!(LatitudeLongitude::new(327.67, -327.68).is_ok());
        assert!(LatitudeLongitude::new(327.68, 0.0).is_err());
    }

    #[test]
    fn test_latitude_longitude_array_length() {
        assert!(matches!(
            LatitudeLongitude::from_raw(&[3775]).unwrap_err(),
            ProfileError::LengthMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_latitude_longitude_reconstruction_uses_raw_keys() {
        let value = LatitudeLongitude::new(37.752_760, -122.413_234).unwrap();
        let mut map = value.string_map();

        // Degree entries are ignored on the way back in
        map.insert("latitude".to_string(), "90.0".to_string());
        let back = LatitudeLongitude::from_string_map(&map).unwrap();
        assert_eq!(back.latitude_raw(), 3775);
        assert!((back.latitude - 37.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_latitude_longitude_initial_value() {
        let initial = LatitudeLongitude::initial_value().unwrap();
        assert_eq!(i16::decode_all_le(&initial), vec![3775, -12241]);
    }

    #[test]
    fn test_register_profiles() {
        let mut registry = ProfileRegistry::new();
        register_profiles(&mut registry).unwrap();
        assert_eq!(registry.len(), 2);

        let hello_uuid = Uuid::parse_str(HELLO_WORLD_SERVICE_UUID).unwrap();
        let hello = registry.service(&hello_uuid).unwrap();
        assert_eq!(hello.name(), "Hello World");
        assert_eq!(hello.tag(), "gnos.us");
        assert_eq!(hello.characteristics().count(), 2);

        let location_uuid = Uuid::parse_str(LOCATION_SERVICE_UUID).unwrap();
        let location = registry.service(&location_uuid).unwrap();
        assert_eq!(location.name(), "Location");
        assert_eq!(location.characteristics().count(), 1);

        let latlon_uuid = Uuid::parse_str(LATITUDE_LONGITUDE_CHARACTERISTIC_UUID).unwrap();
        let latlon = location.characteristic(latlon_uuid).unwrap();
        assert_eq!(latlon.name(), "Latitude and Longitude");
        assert_eq!(latlon.initial_value().unwrap().len(), 4);
    }
}
