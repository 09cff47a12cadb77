//! Registry of [`LiveTvService`] implementations.
//!
//! Programs name the service that produced them; the [`ServiceRegistry`]
//! resolves that name back to a service so its image endpoint can be used.

use std::sync::Arc;

use super::service::LiveTvService;

/// A registry that manages multiple [`LiveTvService`] implementations.
///
/// Services are stored in registration order. Lookups compare names
/// case-insensitively and return the first registered match.
///
/// # Examples
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use guideart::live_tv::ServiceRegistry;
///
/// let mut registry = ServiceRegistry::new();
/// registry.register(Arc::new(my_service));
///
/// let service = registry.get("HDHomeRun");
/// ```
#[derive(Default)]
pub struct ServiceRegistry {
    services: Vec<Arc<dyn LiveTvService>>,
}

impl ServiceRegistry {
    /// Create an empty registry with no services.
    pub fn new() -> Self {
        Self {
            services: Vec::new(),
        }
    }

    /// Register a new backend service.
    pub fn register(&mut self, service: Arc<dyn LiveTvService>) {
        self.services.push(service);
    }

    /// Look up a service by [`LiveTvService::name`], ignoring case.
    ///
    /// Returns `None` if no service with the given name has been registered.
    pub fn get(&self, name: &str) -> Option<&dyn LiveTvService> {
        let wanted = name.to_lowercase();
        self.services
            .iter()
            .find(|s| s.name().to_lowercase() == wanted)
            .map(|s| s.as_ref())
    }

    /// Names of all registered services, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.services.iter().map(|s| s.name()).collect()
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("services", &self.names())
            .finish()
    }
}
