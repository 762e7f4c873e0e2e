//! Resolution context and lookup order
//!
//! A [`Resolution`] is created fresh for every top-level
//! [`Registry::resolve`](super::Registry::resolve) call and passed to
//! constructor closures, so nested parameter lookups share one resolution
//! path. The path is what turns a self-referential constructor chain into
//! a fast [`CyclicDependency`](crate::Error::CyclicDependency) failure
//! instead of unbounded recursion.

use super::{BoxedService, Registry};
use crate::error::{Error, Result};
use crate::key::ServiceKey;
use crate::locks::read_lock;
use std::cell::RefCell;
use std::sync::Arc;
use tracing::trace;

/// Per-call resolution context
pub struct Resolution<'a> {
    registry: &'a Registry,
    path: RefCell<Vec<ServiceKey>>,
}

impl<'a> Resolution<'a> {
    pub(super) fn root(registry: &'a Registry) -> Self {
        Self {
            registry,
            path: RefCell::new(Vec::new()),
        }
    }

    /// Resolve an instance of the requested type
    ///
    /// Runs the same lookup order as the registry itself: singletons,
    /// instances, factories, constructor fallback. Constructor closures
    /// call this for each of their parameters.
    pub fn resolve<T>(&self) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        let key = ServiceKey::of::<T>();
        let service = self.lookup(key)?;
        service
            .downcast::<T>()
            .map_err(|_| Error::internal(format!("stored service for {key} has a foreign type")))
    }

    fn lookup(&self, key: ServiceKey) -> Result<BoxedService> {
        {
            let singletons = read_lock(&self.registry.singletons, "Resolution::lookup")?;
            if let Some(service) = singletons.get(&key) {
                return Ok(Arc::clone(service));
            }
        }
        {
            let instances = read_lock(&self.registry.instances, "Resolution::lookup")?;
            if let Some(service) = instances.get(&key) {
                return Ok(Arc::clone(service));
            }
        }
        // Clone the factory out so no lock is held while user code runs.
        let factory = {
            let factories = read_lock(&self.registry.factories, "Resolution::lookup")?;
            factories.get(&key).cloned()
        };
        if let Some(factory) = factory {
            return Ok(factory());
        }
        self.construct(key)
    }

    /// Auto-wire fallback: build the value through its registered constructor
    fn construct(&self, key: ServiceKey) -> Result<BoxedService> {
        let ctor = {
            let constructors = read_lock(&self.registry.constructors, "Resolution::construct")?;
            constructors.get(&key).cloned()
        };
        let Some(ctor) = ctor else {
            return Err(Error::unresolved(key));
        };

        self.enter(key)?;
        trace!(service = key.name(), "auto-wiring");
        let built = ctor(self);
        self.path.borrow_mut().pop();

        match built {
            Ok(service) => Ok(service),
            // Surface the full cycle path unwrapped so the outermost caller
            // sees it directly.
            Err(err @ Error::CyclicDependency { .. }) => Err(err),
            Err(cause) => Err(Error::auto_wire(key, cause)),
        }
    }

    fn enter(&self, key: ServiceKey) -> Result<()> {
        let mut path = self.path.borrow_mut();
        if path.contains(&key) {
            let mut cycle = path.clone();
            cycle.push(key);
            return Err(Error::cyclic(cycle));
        }
        path.push(key);
        Ok(())
    }
}
