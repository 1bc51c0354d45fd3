//! Capability lookup for diagnostic values.
//!
//! Consumers such as editor integrations register providers on a
//! [`CapabilityRegistry`]; values implementing [`Adaptable`] forward lookups
//! to it without depending on any consumer.

mod registry;

use std::any::Any;

pub use registry::{CapabilityRegistry, Resolution};

/// A value that can be resolved into consumer-specific views.
///
/// The default methods forward the value itself to a registry; implementors
/// only need an empty `impl`.
pub trait Adaptable: Any + Sized {
    /// Resolves capability `id` through [`CapabilityRegistry::global`].
    ///
    /// Returns [`Resolution::Unsupported`] when no provider answers; never
    /// panics.
    fn resolve_capability(&self, id: &str) -> Resolution {
        self.resolve_capability_in(CapabilityRegistry::global(), id)
    }

    /// Resolves capability `id` through a specific registry.
    fn resolve_capability_in(
        &self,
        registry: &CapabilityRegistry,
        id: &str,
    ) -> Resolution {
        registry.resolve(self, id)
    }
}
