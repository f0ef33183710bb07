//! Package type to handler lookup

use crate::core::error::{PluginError, PluginResult};
use crate::core::handlers::{EcosystemHandler, GenericHandler, PackageHandler};
use crate::core::package_type::PackageType;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Fixed table of handlers, built once and read-only afterwards.
///
/// Keys and lookups both use the upper-case form, so resolution is
/// case-insensitive. An empty type resolves to the generic handler.
pub struct HandlerRegistry {
    handlers: BTreeMap<String, Arc<dyn PackageHandler>>,
}

impl HandlerRegistry {
    /// Registry with a handler for every known package type
    pub fn new() -> Self {
        let mut registry = Self {
            handlers: BTreeMap::new(),
        };

        registry.register(Arc::new(GenericHandler::new()));
        for package_type in PackageType::ALL {
            if package_type != PackageType::Generic {
                registry.register(Arc::new(EcosystemHandler::new(package_type)));
            }
        }

        registry
    }

    fn register(&mut self, handler: Arc<dyn PackageHandler>) {
        self.handlers
            .insert(handler.package_type().as_str().to_string(), handler);
    }

    /// Handler for `package_type`, or an error listing the supported types
    pub fn resolve(&self, package_type: &str) -> PluginResult<Arc<dyn PackageHandler>> {
        let key = PackageType::normalize(package_type);
        self.handlers
            .get(&key)
            .cloned()
            .ok_or_else(|| PluginError::UnsupportedPackageType {
                requested: package_type.to_string(),
                supported: self.supported_types().join(", "),
            })
    }

    pub fn is_supported(&self, package_type: &str) -> bool {
        self.handlers
            .contains_key(&PackageType::normalize(package_type))
    }

    /// Registered keys, sorted
    pub fn supported_types(&self) -> Vec<String> {
        // BTreeMap iterates in key order
        self.handlers.keys().cloned().collect()
    }

    /// Types whose pull, get and delete are implemented
    pub fn implemented_types(&self) -> Vec<PackageType> {
        vec![PackageType::Generic]
    }

    /// Registered types that only support push so far
    pub fn planned_types(&self) -> Vec<PackageType> {
        let implemented = self.implemented_types();
        self.handlers
            .values()
            .map(|h| h.package_type())
            .filter(|t| !implemented.contains(t))
            .collect()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
