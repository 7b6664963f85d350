use crate::profile::ServiceProfile;
use std::collections::HashMap;
use tracing::{debug, warn};
use uuid::Uuid;

/// Process-wide catalog of service profiles, keyed by service UUID
///
/// Constructed once at process start and passed by reference to
/// registration and lookup call sites. The intended discipline is
/// single-writer-then-many-readers: complete all [`add_service`] calls
/// during startup before concurrent reads begin, or guard the registry
/// with a lock if registration can race with lookup. There is no removal
/// operation; the catalog is append-only for the process lifetime.
///
/// [`add_service`]: ProfileRegistry::add_service
#[derive(Default)]
pub struct ProfileRegistry {
    services: HashMap<Uuid, ServiceProfile>,
}

impl ProfileRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a service profile, keyed by its UUID
    ///
    /// A service already registered under the same UUID is replaced (last
    /// writer wins) and returned, so accidental duplicates are observable.
    pub fn add_service(&mut self, service: ServiceProfile) -> Option<ServiceProfile> {
        let uuid = service.uuid();
        debug!("registering service profile '{}' ({uuid})", service.name());

        let replaced = self.services.insert(uuid, service);
        if let Some(old) = &replaced {
            warn!(
                "service profile '{}' replaced an existing registration for {uuid}",
                old.name()
            );
        }
        replaced
    }

    /// Look up a service profile by UUID
    #[must_use]
    pub fn service(&self, uuid: &Uuid) -> Option<&ServiceProfile> {
        self.services.get(uuid)
    }

    /// Iterate all registered service profiles
    pub fn services(&self) -> impl Iterator<Item = &ServiceProfile> + '_ {
        self.services.values()
    }

    /// Number of registered services
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Check whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVICE_UUID: &str = "2f0a0000-69aa-f316-3e78-4194989a6c1a";

    #[test]
    fn test_lookup() {
        let mut registry = ProfileRegistry::new();
        assert!(registry.is_empty());

        let service = ServiceProfile::new(SERVICE_UUID, "Hello World", "gnos.us").unwrap();
        let uuid = service.uuid();
        assert!(registry.add_service(service).is_none());

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.service(&uuid).unwrap().name(), "Hello World");
        assert!(registry.service(&Uuid::nil()).is_none());
    }

    #[test]
    fn test_duplicate_uuid_overwrites() {
        let mut registry = ProfileRegistry::new();

        let first = ServiceProfile::new(SERVICE_UUID, "First", "test").unwrap();
        let uuid = first.uuid();
        registry.add_service(first);

        let second = ServiceProfile::new(SERVICE_UUID, "Second", "test").unwrap();
        let replaced = registry.add_service(second);

        assert_eq!(replaced.unwrap().name(), "First");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.service(&uuid).unwrap().name(), "Second");
    }
}
