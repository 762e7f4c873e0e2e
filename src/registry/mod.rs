//! Typed service registry
//!
//! The [`Registry`] owns four backing maps, one per registration kind.
//! Singletons and instances share semantics (two maps are kept for API
//! parity with the lifetimes callers expect to name); factories produce a
//! fresh value per resolution; constructors are the auto-wire fallback,
//! consulted only when no explicit registration matches.
//!
//! Registration is expected to happen once at process startup, resolution
//! on every unit of work, so each map sits behind its own read-biased
//! `RwLock`. Re-registering a key silently overwrites the previous entry
//! in the same map; across maps, the resolution order arbitrates.

mod injector;
mod resolution;

pub use injector::Injector;
pub use resolution::Resolution;

use crate::error::Result;
use crate::key::ServiceKey;
use crate::locks::{read_lock, write_lock};
use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Type-erased service value
type BoxedService = Arc<dyn Any + Send + Sync>;

/// Zero-argument factory producing a fresh value per resolution
type FactoryFn = Arc<dyn Fn() -> BoxedService + Send + Sync>;

/// Constructor resolving its parameters through the shared context
type ConstructorFn = Arc<dyn Fn(&Resolution<'_>) -> Result<BoxedService> + Send + Sync>;

/// Thread-safe service registry
pub struct Registry {
    singletons: RwLock<HashMap<ServiceKey, BoxedService>>,
    instances: RwLock<HashMap<ServiceKey, BoxedService>>,
    factories: RwLock<HashMap<ServiceKey, FactoryFn>>,
    constructors: RwLock<HashMap<ServiceKey, ConstructorFn>>,
}

impl Registry {
    /// Create a new, empty registry
    pub fn new() -> Self {
        Self {
            singletons: RwLock::new(HashMap::new()),
            instances: RwLock::new(HashMap::new()),
            factories: RwLock::new(HashMap::new()),
            constructors: RwLock::new(HashMap::new()),
        }
    }

    /// Register a singleton instance
    ///
    /// The same `Arc<T>` is returned on every resolution.
    pub fn register_singleton<T>(&self, instance: T) -> Result<()>
    where
        T: Send + Sync + 'static,
    {
        let key = ServiceKey::of::<T>();
        debug!(service = key.name(), "registering singleton");
        let mut singletons = write_lock(&self.singletons, "Registry::register_singleton")?;
        singletons.insert(key, Arc::new(instance));
        Ok(())
    }

    /// Register a specific instance
    ///
    /// Behaviorally identical to [`register_singleton`](Self::register_singleton);
    /// stored in a separate backing map so the two lifetimes can be named
    /// and listed independently.
    pub fn register_instance<T>(&self, instance: T) -> Result<()>
    where
        T: Send + Sync + 'static,
    {
        let key = ServiceKey::of::<T>();
        debug!(service = key.name(), "registering instance");
        let mut instances = write_lock(&self.instances, "Registry::register_instance")?;
        instances.insert(key, Arc::new(instance));
        Ok(())
    }

    /// Register a transient service with a factory function
    ///
    /// The factory is invoked fresh on every resolution; results are never
    /// cached.
    pub fn register_transient<T, F>(&self, factory: F) -> Result<()>
    where
        T: Send + Sync + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let key = ServiceKey::of::<T>();
        debug!(service = key.name(), "registering transient factory");
        let boxed: FactoryFn = Arc::new(move || Arc::new(factory()) as BoxedService);
        let mut factories = write_lock(&self.factories, "Registry::register_transient")?;
        factories.insert(key, boxed);
        Ok(())
    }

    /// Register a constructor for a type, making it auto-wirable
    ///
    /// The closure is the type's explicit constructor-parameter metadata:
    /// it resolves each parameter through the [`Resolution`] context and
    /// builds the value. Consulted only when no singleton, instance, or
    /// factory registration matches.
    pub fn register_constructor<T, F>(&self, ctor: F) -> Result<()>
    where
        T: Send + Sync + 'static,
        F: Fn(&Resolution<'_>) -> Result<T> + Send + Sync + 'static,
    {
        let key = ServiceKey::of::<T>();
        debug!(service = key.name(), "registering constructor");
        let boxed: ConstructorFn = Arc::new(move |cx| Ok(Arc::new(ctor(cx)?) as BoxedService));
        let mut constructors = write_lock(&self.constructors, "Registry::register_constructor")?;
        constructors.insert(key, boxed);
        Ok(())
    }

    /// Resolve an instance of the requested type
    ///
    /// Resolution order, first match wins: singletons, instances, factories
    /// (invoked, not cached), then the constructor fallback. Fails with
    /// [`Error::UnresolvedDependency`](crate::Error::UnresolvedDependency)
    /// when nothing matches.
    pub fn resolve<T>(&self) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        Resolution::root(self).resolve::<T>()
    }

    /// Check whether any registration exists for a type
    pub fn is_registered<T: 'static>(&self) -> bool {
        let key = ServiceKey::of::<T>();
        map_holds(&self.singletons, key)
            || map_holds(&self.instances, key)
            || map_holds(&self.factories, key)
            || map_holds(&self.constructors, key)
    }

    /// List the keys registered in any backing map
    pub fn registered_keys(&self) -> Vec<ServiceKey> {
        let mut keys = HashSet::new();
        if let Ok(map) = read_lock(&self.singletons, "Registry::registered_keys") {
            keys.extend(map.keys().copied());
        }
        if let Ok(map) = read_lock(&self.instances, "Registry::registered_keys") {
            keys.extend(map.keys().copied());
        }
        if let Ok(map) = read_lock(&self.factories, "Registry::registered_keys") {
            keys.extend(map.keys().copied());
        }
        if let Ok(map) = read_lock(&self.constructors, "Registry::registered_keys") {
            keys.extend(map.keys().copied());
        }
        keys.into_iter().collect()
    }

    /// Create a cloneable resolution handle for one service type
    ///
    /// The handle holds its own reference to the registry, so it can be
    /// stored in request-handling state and used without threading the
    /// registry through every call site.
    pub fn injector<T>(self: &Arc<Self>) -> Injector<T>
    where
        T: Send + Sync + 'static,
    {
        Injector::new(Arc::clone(self))
    }
}

fn map_holds<V>(map: &RwLock<HashMap<ServiceKey, V>>, key: ServiceKey) -> bool {
    read_lock(map, "Registry::is_registered")
        .map(|m| m.contains_key(&key))
        .unwrap_or(false)
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field(
                "singletons",
                &self.singletons.read().map(|m| m.len()).unwrap_or(0),
            )
            .field(
                "instances",
                &self.instances.read().map(|m| m.len()).unwrap_or(0),
            )
            .field(
                "factories",
                &self.factories.read().map(|m| m.len()).unwrap_or(0),
            )
            .field(
                "constructors",
                &self.constructors.read().map(|m| m.len()).unwrap_or(0),
            )
            .finish()
    }
}
