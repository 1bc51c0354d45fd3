use std::{any::{Any, TypeId}, collections::HashMap, fmt, sync::Arc};

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::{debug, trace};

/// A type-erased provider: gets the value as `&dyn Any`, hands back a boxed
/// capability, or `None` if it does not apply to this particular value.
type Provider =
    Arc<dyn Fn(&dyn Any) -> Option<Box<dyn Any + Send>> + Send + Sync>;

static GLOBAL: Lazy<CapabilityRegistry> = Lazy::new(CapabilityRegistry::new);

/// The outcome of a capability lookup.
#[derive(Debug)]
pub enum Resolution {
    /// A provider produced a view of the value.
    Supported(Box<dyn Any + Send>),

    /// No provider is registered for this capability on this value type, or
    /// every registered provider declined.
    Unsupported,
}

impl Resolution {
    #[inline]
    pub fn is_supported(&self) -> bool {
        matches!(self, Resolution::Supported(_))
    }

    /// Unwraps the capability as a `T`. Returns `None` when unsupported or
    /// when the provider produced a different type.
    pub fn downcast<T: Any>(self) -> Option<T> {
        match self {
            Resolution::Supported(handle) => {
                handle.downcast::<T>().ok().map(|handle| *handle)
            }
            Resolution::Unsupported => None,
        }
    }
}

/// Maps `(value type, capability id)` to the providers able to produce that
/// capability.
///
/// Value types never learn which capabilities exist. Consumers register a
/// provider here, and values forward lookups here (see
/// [`super::Adaptable`]). Several providers may share a key; they are tried
/// in registration order and the first one returning `Some` wins.
///
/// The registry lock is never held while a provider runs, so a provider may
/// look up other capabilities.
pub struct CapabilityRegistry {
    providers: RwLock<HashMap<TypeId, HashMap<String, Vec<Provider>>>>,
}

impl CapabilityRegistry {
    /// Creates an empty registry, independent of the global one.
    pub fn new() -> Self {
        CapabilityRegistry {
            providers: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the process-wide registry.
    pub fn global() -> &'static CapabilityRegistry {
        &GLOBAL
    }

    /// Registers `provider` as a source of capability `id` for values of
    /// type `V`.
    pub fn register<V, C, F>(&self, id: impl Into<String>, provider: F)
    where
        V: Any,
        C: Any + Send,
        F: Fn(&V) -> Option<C> + Send + Sync + 'static,
    {
        let id = id.into();
        debug!(
            capability = %id,
            value_type = std::any::type_name::<V>(),
            "registering capability provider",
        );
        let erased: Provider = Arc::new(move |value: &dyn Any| {
            let value = value.downcast_ref::<V>()?;
            provider(value).map(|c| Box::new(c) as Box<dyn Any + Send>)
        });
        self.providers
            .write()
            .entry(TypeId::of::<V>())
            .or_default()
            .entry(id)
            .or_default()
            .push(erased);
    }

    /// Looks up capability `id` for `value`.
    pub fn resolve<V: Any>(&self, value: &V, id: &str) -> Resolution {
        let candidates = self.providers_for::<V>(id);
        for provider in &candidates {
            if let Some(handle) = provider(value as &dyn Any) {
                trace!(
                    capability = id,
                    value_type = std::any::type_name::<V>(),
                    "capability resolved",
                );
                return Resolution::Supported(handle);
            }
        }
        trace!(
            capability = id,
            value_type = std::any::type_name::<V>(),
            providers = candidates.len(),
            "capability unsupported",
        );
        Resolution::Unsupported
    }

    /// Returns `true` if at least one provider is registered for `id` on
    /// values of type `V`.
    pub fn has_provider<V: Any>(&self, id: &str) -> bool {
        !self.providers_for::<V>(id).is_empty()
    }

    /// Removes every provider of `id` for `V`, returning how many there were.
    pub fn unregister_all<V: Any>(&self, id: &str) -> usize {
        let mut providers = self.providers.write();
        let Some(by_id) = providers.get_mut(&TypeId::of::<V>()) else {
            return 0;
        };
        let removed = by_id.remove(id).map_or(0, |list| list.len());
        if by_id.is_empty() {
            providers.remove(&TypeId::of::<V>());
        }
        debug!(capability = id, removed, "unregistered capability providers");
        removed
    }

    /// Removes every provider.
    pub fn clear(&self) {
        self.providers.write().clear();
    }

    /// Snapshots the providers for a key so they can run without the lock.
    fn providers_for<V: Any>(&self, id: &str) -> Vec<Provider> {
        self.providers
            .read()
            .get(&TypeId::of::<V>())
            .and_then(|by_id| by_id.get(id))
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        CapabilityRegistry::new()
    }
}

impl fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let providers = self.providers.read();
        let count: usize = providers
            .values()
            .flat_map(HashMap::values)
            .map(Vec::len)
            .sum();
        f.debug_struct("CapabilityRegistry")
            .field("value_types", &providers.len())
            .field("providers", &count)
            .finish()
    }
}
