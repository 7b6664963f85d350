#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

//! # GattKit
//!
//! A typed BLE GATT profile and serialization framework.
//!
//! GattKit lets an application describe its Bluetooth Low Energy services
//! and characteristics declaratively — UUIDs, permissions, properties,
//! initial values — and convert between raw little/big-endian wire data
//! and strongly-typed domain values. A registry assembles the declarations
//! into a runtime-queryable catalog for the GATT layer to serve.
//!
//! The pieces, leaf to root:
//!
//! - [`codec`]: endian-correct fixed-width integer encode/decode
//! - [`value`]: the conversion contracts a characteristic value type
//!   implements (scalar raw, fixed-size array raw, string-keyed mapping)
//! - [`attribute`]: permission/property metadata and the static
//!   declaration traits
//! - [`profile`]: runtime wrappers converting wire bytes ↔ typed values ↔
//!   string-keyed form, grouped into services
//! - [`registry`]: the process-wide profile catalog
//! - [`profiles`]: built-in service definitions and the registration
//!   entry point
//!
//! Radio I/O is out of scope: GattKit ends at the profile catalog, which a
//! platform GATT layer consumes.
//!
//! ## Quick Start
//!
//! ```
//! use gattkit::{register_profiles, ProfileRegistry};
//! use uuid::Uuid;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut registry = ProfileRegistry::new();
//!     register_profiles(&mut registry)?;
//!
//!     let service_uuid = Uuid::parse_str(gattkit::HELLO_WORLD_SERVICE_UUID)?;
//!     let service = registry
//!         .service(&service_uuid)
//!         .ok_or("service not registered")?;
//!
//!     let char_uuid = Uuid::parse_str(gattkit::UPDATE_PERIOD_CHARACTERISTIC_UUID)?;
//!     let update_period = service
//!         .characteristic(char_uuid)
//!         .ok_or("characteristic not registered")?;
//!
//!     let value = update_period.string_from_data(&[0x88, 0x13])?;
//!     assert_eq!(value["Update Period"], "5000");
//!     Ok(())
//! }
//! ```

/// Attribute metadata and static declaration traits
pub mod attribute;
/// Endian-correct fixed-width integer codec
pub mod codec;
/// Error types and handling
pub mod error;
/// Characteristic and service profile wrappers
pub mod profile;
/// Built-in service profile definitions
pub mod profiles;
/// Service profile registry
pub mod registry;
/// Characteristic value conversion contracts
pub mod value;

// Re-export the main types for convenient usage
pub use attribute::{
    AttributePermission, CharacteristicConfig, CharacteristicProperty, ServiceConfig,
};
pub use codec::{encode_slice_be, encode_slice_le, WireScalar};
pub use error::{ProfileError, Result};
pub use profile::{
    CharacteristicProfile, RawArrayCharacteristic, RawCharacteristic, ServiceProfile,
    Utf8Characteristic,
};
pub use profiles::{
    register_profiles, Greeting, HelloWorldService, LatitudeLongitude, LocationService,
    UpdatePeriod, GREETING_CHARACTERISTIC_UUID, HELLO_WORLD_SERVICE_UUID,
    LATITUDE_LONGITUDE_CHARACTERISTIC_UUID, LOCATION_SERVICE_UUID,
    UPDATE_PERIOD_CHARACTERISTIC_UUID,
};
pub use registry::ProfileRegistry;
pub use value::{scalar_from_map, RawArray, RawValue, ScalarFromStr, StringMap};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
