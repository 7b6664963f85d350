//! Walk the built-in profile catalog and round-trip a characteristic value.
//!
//! Run with: `cargo run --example profile_catalog`

use gattkit::{register_profiles, ProfileRegistry};
use std::collections::HashMap;
use uuid::Uuid;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut registry = ProfileRegistry::new();
    register_profiles(&mut registry)?;

    println!("profile catalog ({} services)", registry.len());
    for service in registry.services() {
        println!(
            "  {} [{}] tag={}",
            service.name(),
            service.uuid(),
            service.tag()
        );
        for characteristic in service.characteristics() {
            println!("    {} [{}]", characteristic.name(), characteristic.uuid());
            println!("      permissions: {:?}", characteristic.permissions());
            println!("      properties:  {:?}", characteristic.properties());
            if let Some(initial) = characteristic.initial_value() {
                match characteristic.string_from_data(&initial) {
                    Ok(value) => println!("      initial:     {value:?}"),
                    Err(_) => println!("      initial:     {initial:02X?}"),
                }
            }
        }
    }

    // Edit the update period through its string-keyed form, the way a
    // configuration UI would, and encode it for the wire.
    let service_uuid = Uuid::parse_str(gattkit::HELLO_WORLD_SERVICE_UUID)?;
    let char_uuid = Uuid::parse_str(gattkit::UPDATE_PERIOD_CHARACTERISTIC_UUID)?;
    let update_period = registry
        .service(&service_uuid)
        .and_then(|service| service.characteristic(char_uuid))
        .ok_or("Update Period not registered")?;

    let edited = HashMap::from([("Update Period".to_string(), "2500".to_string())]);
    let data = update_period.data_from_string(&edited)?;
    println!("encoded Update Period 2500 -> {:02X?}", &data[..]);

    let round_tripped = update_period.string_from_data(&data)?;
    println!("decoded back -> {round_tripped:?}");

    Ok(())
}
